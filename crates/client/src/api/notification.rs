//! The caller's notifications.

use edumall_core::DataResponse;
use edumall_core::schema::notification::Notification;
use tracing::instrument;

use crate::error::ApiError;
use crate::http::{Endpoint, HttpClient};

#[must_use]
pub fn fetch_notifications_endpoint(token: Option<&str>) -> Endpoint {
    Endpoint::get("notification/user").bearer(token)
}

/// Every notification addressed to the caller, read or not.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip_all)]
pub async fn fetch_notifications(
    http: &HttpClient,
    token: Option<&str>,
) -> Result<DataResponse<Vec<Notification>>, ApiError> {
    http.send(fetch_notifications_endpoint(token)).await
}
