//! Events.

use std::sync::Arc;

use edumall_core::schema::event::{Event, EventDetail};
use edumall_core::{DataResponse, EventId, PageResponse};
use tracing::instrument;

use super::Token;
use crate::api::{Page, event};
use crate::error::QueryResult;
use crate::query::{QueryKey, Resource};
use crate::state::AppState;

#[must_use]
pub fn events_key(page: Page) -> QueryKey {
    QueryKey::new(Resource::Events)
        .with("page_size", page.size)
        .with("page_index", page.index)
}

#[must_use]
pub fn event_key(id: &EventId) -> QueryKey {
    QueryKey::new(Resource::Event).with("id", id.as_str())
}

/// # Errors
///
/// Returns an error if the request fails or the response is malformed.
#[instrument(skip(state))]
pub async fn use_events(state: &AppState, page: Page) -> QueryResult<Arc<PageResponse<Event>>> {
    state
        .queries()
        .fetch(events_key(page), || event::fetch_events(state.http(), page))
        .await
}

/// # Errors
///
/// Returns an error if the request fails or the response is malformed.
#[instrument(skip(state))]
pub async fn use_event(
    state: &AppState,
    id: &EventId,
) -> QueryResult<Arc<DataResponse<EventDetail>>> {
    let token = Token::current(state);
    state
        .queries()
        .fetch(event_key(id), || {
            event::fetch_event(state.http(), id, token.as_deref())
        })
        .await
}
