//! Course catalog.

use edumall_core::PageResponse;
use edumall_core::schema::course::Course;
use tracing::instrument;

use super::Page;
use crate::error::ApiError;
use crate::http::{Endpoint, HttpClient};

/// `GET courses?keyword&page_size&page_index`.
#[must_use]
pub fn fetch_courses_endpoint(keyword: Option<&str>, page: Page, token: Option<&str>) -> Endpoint {
    page.apply(Endpoint::get("courses").query_opt("keyword", keyword))
        .bearer(token)
}

/// Search courses. The token lets the server fill in `isBought`.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip(http, token))]
pub async fn fetch_courses(
    http: &HttpClient,
    keyword: Option<&str>,
    page: Page,
    token: Option<&str>,
) -> Result<PageResponse<Course>, ApiError> {
    http.send(fetch_courses_endpoint(keyword, page, token)).await
}
