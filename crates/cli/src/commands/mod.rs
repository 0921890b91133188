//! Command implementations.

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;

use edumall_client::hooks;
use edumall_client::{ApiError, AppState, QueryError};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Print a payload as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{json}");
    }
    Ok(())
}

/// Sign in with `EDUMALL_USERNAME` / `EDUMALL_PASSWORD` when both are set.
///
/// Without them the command runs anonymously and protected endpoints answer
/// 401.
pub async fn login_from_env(state: &AppState) -> Result<(), CliError> {
    let username = std::env::var("EDUMALL_USERNAME").ok().filter(|v| !v.is_empty());
    let password = std::env::var("EDUMALL_PASSWORD").ok().filter(|v| !v.is_empty());

    match (username, password) {
        (Some(username), Some(password)) => {
            hooks::auth::use_login(state, &username, &password).await?;
        }
        _ => tracing::warn!("EDUMALL_USERNAME/EDUMALL_PASSWORD not set, continuing signed out"),
    }
    Ok(())
}
