//! `edumall login`.

use edumall_client::AppState;
use edumall_client::hooks;

use super::{CliError, print_json};

/// Log in and print the user. Tokens are never printed.
pub async fn login(state: &AppState, username: &str, password: &str) -> Result<(), CliError> {
    let session = hooks::auth::use_login(state, username, password).await?;
    tracing::info!(
        expires_access = %session.expires_access,
        "Access token issued"
    );
    print_json(&session.user)
}
