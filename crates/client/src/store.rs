//! Application-wide state shared across screens.
//!
//! Holds the signed-in session and the notification badge in
//! `tokio::sync::watch` channels so any number of consumers can read the
//! current value or wait for the next change.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use edumall_core::DataResponse;
use edumall_core::format::unread_count;
use edumall_core::schema::auth::{Credentials, LoginResult, User};
use edumall_core::schema::notification::Notification;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;
use tracing::debug;

type Notifications = Arc<DataResponse<Vec<Notification>>>;

/// Signed-in user and their token pair.
///
/// Implements `Debug` manually to redact tokens.
#[derive(Clone)]
pub struct Session {
    pub user: User,
    access_token: SecretString,
    refresh_token: SecretString,
    /// Access token expiry as sent by the server.
    pub expires_access: String,
    /// Refresh token expiry as sent by the server.
    pub expires_refresh: String,
}

impl Session {
    #[must_use]
    pub fn new(user: User, credentials: Credentials) -> Self {
        Self {
            user,
            access_token: SecretString::from(credentials.access_token),
            refresh_token: SecretString::from(credentials.refresh_token),
            expires_access: credentials.expires_access,
            expires_refresh: credentials.expires_refresh,
        }
    }

    #[must_use]
    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    #[must_use]
    pub fn refresh_token(&self) -> &SecretString {
        &self.refresh_token
    }

    /// Replace the token pair after a refresh.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        *self = Self::new(self.user.clone(), credentials);
    }

    /// Whether the access token is past its expiry.
    ///
    /// Expiries that are not RFC 3339 timestamps are treated as unknown and
    /// never reported as expired; the server remains the authority.
    #[must_use]
    pub fn is_access_expired(&self, now: DateTime<Utc>) -> bool {
        parse_expiry(&self.expires_access).is_some_and(|at| at <= now)
    }

    /// Whether the refresh token is past its expiry.
    #[must_use]
    pub fn is_refresh_expired(&self, now: DateTime<Utc>) -> bool {
        parse_expiry(&self.expires_refresh).is_some_and(|at| at <= now)
    }
}

impl From<LoginResult> for Session {
    fn from(login: LoginResult) -> Self {
        Self::new(login.user, login.token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_access", &self.expires_access)
            .field("expires_refresh", &self.expires_refresh)
            .finish()
    }
}

fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

/// Unread notification count shown on the tab bar.
#[derive(Debug, Clone, Default)]
pub struct NotificationBadge {
    pub unread: usize,
    /// Fetched list the count was derived from.
    source: Option<Notifications>,
}

/// Shared application store. Cheap to clone.
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<AppStoreInner>,
}

struct AppStoreInner {
    session: watch::Sender<Option<Session>>,
    badge: watch::Sender<NotificationBadge>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStore {
    #[must_use]
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        let (badge, _) = watch::channel(NotificationBadge::default());
        Self {
            inner: Arc::new(AppStoreInner { session, badge }),
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.inner.session.borrow().clone()
    }

    /// Current access token, if signed in.
    #[must_use]
    pub fn access_token(&self) -> Option<SecretString> {
        self.inner
            .session
            .borrow()
            .as_ref()
            .map(|s| s.access_token().clone())
    }

    /// Current refresh token, if signed in.
    #[must_use]
    pub fn refresh_token(&self) -> Option<SecretString> {
        self.inner
            .session
            .borrow()
            .as_ref()
            .map(|s| s.refresh_token().clone())
    }

    pub fn set_session(&self, session: Session) {
        debug!(user_id = %session.user.id, "Session started");
        self.inner.session.send_replace(Some(session));
    }

    /// Swap in a refreshed token pair. Returns `false` when signed out.
    pub fn update_credentials(&self, credentials: Credentials) -> bool {
        self.inner.session.send_if_modified(|session| {
            session.as_mut().is_some_and(|s| {
                s.set_credentials(credentials);
                true
            })
        })
    }

    pub fn clear_session(&self) {
        if self.inner.session.send_replace(None).is_some() {
            debug!("Session cleared");
        }
    }

    #[must_use]
    pub fn subscribe_session(&self) -> watch::Receiver<Option<Session>> {
        self.inner.session.subscribe()
    }

    // =========================================================================
    // Notification badge
    // =========================================================================

    #[must_use]
    pub fn unread_notifications(&self) -> usize {
        self.inner.badge.borrow().unread
    }

    /// Derive the unread count from a fetched list and publish it.
    ///
    /// Publishing the same list again (a cache hit) is a no-op. Returns
    /// whether subscribers were notified.
    pub fn publish_notifications(&self, notifications: &Notifications) -> bool {
        self.inner.badge.send_if_modified(|badge| {
            if badge
                .source
                .as_ref()
                .is_some_and(|last| Arc::ptr_eq(last, notifications))
            {
                return false;
            }
            badge.unread = unread_count(&notifications.data);
            badge.source = Some(Arc::clone(notifications));
            debug!(unread = badge.unread, "Notification badge updated");
            true
        })
    }

    pub fn clear_notifications(&self) {
        self.inner.badge.send_replace(NotificationBadge::default());
    }

    #[must_use]
    pub fn subscribe_notifications(&self) -> watch::Receiver<NotificationBadge> {
        self.inner.badge.subscribe()
    }
}
