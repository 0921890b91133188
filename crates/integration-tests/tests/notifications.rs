//! Notification fetches and the unread badge.

#![allow(clippy::unwrap_used)]

use edumall_client::hooks;
use edumall_client::{ApiError, Resource};
use edumall_integration_tests::{MockBackend, routes};

#[tokio::test]
async fn test_badge_shows_unread_count() {
    let backend = MockBackend::start().await;
    let state = backend.signed_in().await;
    let mut badge = state.store().subscribe_notifications();

    let notifications = hooks::notification::use_notifications(&state).await.unwrap();

    assert_eq!(notifications.data.len(), 3);
    assert!(badge.has_changed().unwrap());
    assert_eq!(badge.borrow_and_update().unread, 2);
    assert_eq!(state.store().unread_notifications(), 2);
}

#[tokio::test]
async fn test_cache_hit_does_not_republish() {
    let backend = MockBackend::start().await;
    let state = backend.signed_in().await;
    let mut badge = state.store().subscribe_notifications();

    hooks::notification::use_notifications(&state).await.unwrap();
    drop(badge.borrow_and_update());

    hooks::notification::use_notifications(&state).await.unwrap();
    assert_eq!(backend.hits(routes::NOTIFICATIONS), 1);
    assert!(!badge.has_changed().unwrap());

    state.queries().invalidate(Resource::Notifications);
    hooks::notification::use_notifications(&state).await.unwrap();
    assert_eq!(backend.hits(routes::NOTIFICATIONS), 2);
    assert!(badge.has_changed().unwrap());
}

#[tokio::test]
async fn test_malformed_payload_is_a_schema_error() {
    let backend = MockBackend::start().await;
    let state = backend.signed_in().await;
    hooks::notification::use_notifications(&state).await.unwrap();
    state.queries().invalidate(Resource::Notifications);
    backend.set_malformed_notifications(true);

    let err = hooks::notification::use_notifications(&state).await.unwrap_err();

    match err.api().unwrap() {
        ApiError::Schema(schema) => assert_eq!(schema.path, "data[1].isRead"),
        other => panic!("expected a schema error, got {other:?}"),
    }
    // Badge keeps the last good value
    assert_eq!(state.store().unread_notifications(), 2);
}
