//! Uploads. Nothing cached depends on them.

use edumall_core::DataResponse;
use edumall_core::schema::upload::UploadedFile;
use tracing::instrument;

use super::Token;
use crate::api::upload;
use crate::error::QueryResult;
use crate::http::Upload;
use crate::state::AppState;

/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip(state, file), fields(file_name = %file.file_name))]
pub async fn use_upload_image(state: &AppState, file: Upload) -> QueryResult<DataResponse<UploadedFile>> {
    let token = Token::current(state);
    state
        .queries()
        .mutate(upload::upload_image(state.http(), file, token.as_deref()), &[])
        .await
}

/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip(state, file), fields(file_name = %file.file_name))]
pub async fn use_upload_file(state: &AppState, file: Upload) -> QueryResult<DataResponse<UploadedFile>> {
    let token = Token::current(state);
    state
        .queries()
        .mutate(upload::upload_file(state.http(), file, token.as_deref()), &[])
        .await
}
