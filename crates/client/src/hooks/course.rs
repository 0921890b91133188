//! Course catalog.

use std::sync::Arc;

use edumall_core::PageResponse;
use edumall_core::schema::course::Course;
use tracing::instrument;

use super::Token;
use crate::api::{Page, course};
use crate::error::QueryResult;
use crate::query::{QueryKey, Resource};
use crate::state::AppState;

#[must_use]
pub fn courses_key(keyword: Option<&str>, page: Page) -> QueryKey {
    QueryKey::new(Resource::Courses)
        .with("keyword", keyword)
        .with("page_size", page.size)
        .with("page_index", page.index)
}

/// # Errors
///
/// Returns an error if the request fails or the response is malformed.
#[instrument(skip(state))]
pub async fn use_courses(
    state: &AppState,
    keyword: Option<&str>,
    page: Page,
) -> QueryResult<Arc<PageResponse<Course>>> {
    let token = Token::current(state);
    state
        .queries()
        .fetch(courses_key(keyword, page), || {
            course::fetch_courses(state.http(), keyword, page, token.as_deref())
        })
        .await
}
