//! In-app notifications.

use serde::{Deserialize, Serialize};

use crate::types::NotificationId;

/// A notification addressed to the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: String,
}
