//! Events and workshops.

use edumall_core::schema::event::{Event, EventDetail};
use edumall_core::{DataResponse, EventId, PageResponse};
use tracing::instrument;

use super::Page;
use crate::error::ApiError;
use crate::http::{Endpoint, HttpClient};

/// `GET events?page_size&page_index`. Public.
#[must_use]
pub fn fetch_events_endpoint(page: Page) -> Endpoint {
    page.apply(Endpoint::get("events"))
}

/// One page of upcoming events.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip(http))]
pub async fn fetch_events(http: &HttpClient, page: Page) -> Result<PageResponse<Event>, ApiError> {
    http.send(fetch_events_endpoint(page)).await
}

#[must_use]
pub fn fetch_event_endpoint(id: &EventId, token: Option<&str>) -> Endpoint {
    Endpoint::get("events").segment(id).bearer(token)
}

/// Event with description and seat count.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip(http, token))]
pub async fn fetch_event(
    http: &HttpClient,
    id: &EventId,
    token: Option<&str>,
) -> Result<DataResponse<EventDetail>, ApiError> {
    http.send(fetch_event_endpoint(id, token)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::url;

    #[test]
    fn test_fetch_events_is_public() {
        let endpoint = fetch_events_endpoint(Page::new(2, 10));
        assert_eq!(
            url(&endpoint),
            "https://api.edumall.vn/api/events?page_size=10&page_index=2"
        );
        assert!(endpoint.bearer.is_none());
    }

    #[test]
    fn test_fetch_event_path() {
        let endpoint = fetch_event_endpoint(&EventId::new("ev 1"), Some("tok"));
        assert_eq!(url(&endpoint), "https://api.edumall.vn/api/events/ev%201");
    }
}
