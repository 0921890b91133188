//! Blog posts, comments and reactions.

use edumall_core::schema::blog::{
    Blog, BlogComment, BlogDetail, BlogReaction, CreateBlogComment, CreateBlogReact,
};
use edumall_core::{BlogId, DataResponse, PageResponse};
use tracing::instrument;
use validator::Validate;

use super::Page;
use crate::error::ApiError;
use crate::http::{Endpoint, HttpClient};

/// `GET blogs?keyword&page_size&page_index`. Public.
#[must_use]
pub fn fetch_blogs_endpoint(keyword: Option<&str>, page: Page) -> Endpoint {
    page.apply(Endpoint::get("blogs").query_opt("keyword", keyword))
}

/// Search blog posts, newest first.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip(http))]
pub async fn fetch_blogs(
    http: &HttpClient,
    keyword: Option<&str>,
    page: Page,
) -> Result<PageResponse<Blog>, ApiError> {
    http.send(fetch_blogs_endpoint(keyword, page)).await
}

/// `GET blogs/{id}`.
#[must_use]
pub fn fetch_blog_endpoint(id: &BlogId, token: Option<&str>) -> Endpoint {
    Endpoint::get("blogs").segment(id).bearer(token)
}

/// Full post, including whether the caller has reacted to it.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip(http, token))]
pub async fn fetch_blog(
    http: &HttpClient,
    id: &BlogId,
    token: Option<&str>,
) -> Result<DataResponse<BlogDetail>, ApiError> {
    http.send(fetch_blog_endpoint(id, token)).await
}

/// `GET blog-comments/{id}?page_size&page_index`. Public.
#[must_use]
pub fn fetch_blog_comments_endpoint(id: &BlogId, page: Page) -> Endpoint {
    page.apply(Endpoint::get("blog-comments").segment(id))
}

/// One page of comments under a post.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip(http))]
pub async fn fetch_blog_comments(
    http: &HttpClient,
    id: &BlogId,
    page: Page,
) -> Result<PageResponse<BlogComment>, ApiError> {
    http.send(fetch_blog_comments_endpoint(id, page)).await
}

/// `POST blog-comments`.
///
/// # Errors
///
/// Returns an error if the body fails its field rules.
pub fn create_blog_comment_endpoint(
    body: &CreateBlogComment,
    token: Option<&str>,
) -> Result<Endpoint, ApiError> {
    body.validate()?;
    Endpoint::post("blog-comments").bearer(token).json(body)
}

/// Comment on a post.
///
/// # Errors
///
/// Returns an error if the request is invalid, the server rejects it or the
/// response does not match its schema.
#[instrument(skip(http, body, token), fields(blog_id = %body.blog_id))]
pub async fn create_blog_comment(
    http: &HttpClient,
    body: &CreateBlogComment,
    token: Option<&str>,
) -> Result<DataResponse<BlogComment>, ApiError> {
    http.send(create_blog_comment_endpoint(body, token)?).await
}

/// `POST blog-reacts`.
///
/// # Errors
///
/// Returns an error if the body cannot be encoded.
pub fn react_blog_endpoint(
    body: &CreateBlogReact,
    token: Option<&str>,
) -> Result<Endpoint, ApiError> {
    Endpoint::post("blog-reacts").bearer(token).json(body)
}

/// Toggle the caller's reaction on a post.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip(http, body, token), fields(blog_id = %body.blog_id))]
pub async fn react_blog(
    http: &HttpClient,
    body: &CreateBlogReact,
    token: Option<&str>,
) -> Result<DataResponse<BlogReaction>, ApiError> {
    http.send(react_blog_endpoint(body, token)?).await
}
