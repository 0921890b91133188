//! Notifications and saved addresses.

use edumall_client::AppState;
use edumall_client::hooks;
use serde::Serialize;

use super::{CliError, print_json};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationsOutput<'a, T: Serialize> {
    unread: usize,
    notifications: &'a T,
}

pub async fn notifications(state: &AppState) -> Result<(), CliError> {
    let notifications = hooks::notification::use_notifications(state).await?;
    print_json(&NotificationsOutput {
        unread: state.store().unread_notifications(),
        notifications: &notifications.data,
    })
}

pub async fn addresses(state: &AppState) -> Result<(), CliError> {
    let addresses = hooks::shipping::use_shipping_infos(state).await?;
    print_json(&addresses.data)
}
