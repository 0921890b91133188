//! Sign-in, sign-up and token refresh.

use edumall_core::schema::auth::{LoginRequest, RefreshTokenRequest, RegisterRequest, User};
use secrecy::ExposeSecret;
use tracing::{info, instrument};

use crate::api::auth;
use crate::error::QueryResult;
use crate::state::AppState;
use crate::store::Session;

/// Log in and make the new session current.
///
/// Cached results belong to the previous user, so the cache and the
/// notification badge are cleared.
///
/// # Errors
///
/// Returns an error if the credentials are rejected or the request fails.
#[instrument(skip(state, password))]
pub async fn use_login(state: &AppState, username: &str, password: &str) -> QueryResult<Session> {
    let body = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    let response = state
        .queries()
        .mutate(auth::login(state.http(), &body), &[])
        .await?;

    let session = Session::from(response.data);
    state.store().set_session(session.clone());
    state.queries().invalidate_all();
    state.store().clear_notifications();
    info!(user_id = %session.user.id, role = %session.user.role, "Logged in");
    Ok(session)
}

/// Create an account. Does not sign in.
///
/// # Errors
///
/// Returns an error if the request is invalid or the server rejects it.
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn use_register(state: &AppState, body: &RegisterRequest) -> QueryResult<User> {
    let response = state
        .queries()
        .mutate(auth::register(state.http(), body), &[])
        .await?;
    Ok(response.data)
}

fn refresh_request(state: &AppState) -> RefreshTokenRequest {
    RefreshTokenRequest {
        refresh_token: state
            .store()
            .refresh_token()
            .map(|t| t.expose_secret().to_owned())
            .unwrap_or_default(),
    }
}

/// Trade the session's refresh token for a new token pair.
///
/// Without a session the empty refresh token fails its field rules and
/// nothing is sent.
///
/// # Errors
///
/// Returns an error if the refresh token is missing or rejected.
#[instrument(skip_all)]
pub async fn use_refresh_token(state: &AppState) -> QueryResult<()> {
    let body = refresh_request(state);
    let response = state
        .queries()
        .mutate(auth::refresh_token(state.http(), &body), &[])
        .await?;
    state.store().update_credentials(response.data);
    Ok(())
}

/// Whether the session's refresh token is still accepted.
///
/// # Errors
///
/// Returns an error if the refresh token is missing or the request fails.
#[instrument(skip_all)]
pub async fn use_check_refresh(state: &AppState) -> QueryResult<bool> {
    let body = refresh_request(state);
    let response = state
        .queries()
        .mutate(auth::check_refresh(state.http(), &body), &[])
        .await?;
    Ok(response.data.is_valid)
}

/// Forget the session, every cached result and the badge.
pub fn logout(state: &AppState) {
    state.store().clear_session();
    state.queries().invalidate_all();
    state.store().clear_notifications();
    info!("Logged out");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ApiError;

    #[tokio::test]
    async fn test_refresh_without_session_is_not_sent() {
        let state =
            AppState::new(ClientConfig::new(Url::parse("http://localhost:1/").unwrap())).unwrap();
        let err = use_refresh_token(&state).await.unwrap_err();
        assert!(matches!(err.api(), Some(ApiError::InvalidRequest(_))));
    }
}
