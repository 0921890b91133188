//! Notifications and the unread badge.

use std::sync::Arc;

use edumall_core::DataResponse;
use edumall_core::schema::notification::Notification;
use tracing::instrument;

use super::Token;
use crate::api::notification;
use crate::error::QueryResult;
use crate::query::{QueryKey, Resource};
use crate::state::AppState;

#[must_use]
pub const fn notifications_key() -> QueryKey {
    QueryKey::new(Resource::Notifications)
}

/// Fetch notifications and publish the unread count to the store.
///
/// The count is republished only when the fetched list is a new result, not
/// when the same cached list is served again.
///
/// # Errors
///
/// Returns an error if the request fails or the response is malformed. The
/// badge keeps its previous value in that case.
#[instrument(skip_all)]
pub async fn use_notifications(
    state: &AppState,
) -> QueryResult<Arc<DataResponse<Vec<Notification>>>> {
    let token = Token::current(state);
    let notifications = state
        .queries()
        .fetch(notifications_key(), || {
            notification::fetch_notifications(state.http(), token.as_deref())
        })
        .await?;

    state.store().publish_notifications(&notifications);
    Ok(notifications)
}
