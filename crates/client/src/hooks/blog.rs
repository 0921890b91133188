//! Blog posts, comments and reactions.

use std::sync::Arc;

use edumall_core::schema::blog::{
    Blog, BlogComment, BlogDetail, BlogReaction, CreateBlogComment, CreateBlogReact,
};
use edumall_core::{BlogId, DataResponse, PageResponse};
use tracing::instrument;

use super::Token;
use crate::api::{Page, blog};
use crate::error::QueryResult;
use crate::query::{QueryKey, Resource};
use crate::state::AppState;

#[must_use]
pub fn blogs_key(keyword: Option<&str>, page: Page) -> QueryKey {
    QueryKey::new(Resource::Blogs)
        .with("keyword", keyword)
        .with("page_size", page.size)
        .with("page_index", page.index)
}

#[must_use]
pub fn blog_key(id: &BlogId) -> QueryKey {
    QueryKey::new(Resource::Blog).with("id", id.as_str())
}

#[must_use]
pub fn blog_comments_key(id: &BlogId, page: Page) -> QueryKey {
    QueryKey::new(Resource::BlogComments)
        .with("id", id.as_str())
        .with("page_size", page.size)
        .with("page_index", page.index)
}

/// # Errors
///
/// Returns an error if the request fails or the response is malformed.
#[instrument(skip(state))]
pub async fn use_blogs(
    state: &AppState,
    keyword: Option<&str>,
    page: Page,
) -> QueryResult<Arc<PageResponse<Blog>>> {
    state
        .queries()
        .fetch(blogs_key(keyword, page), || {
            blog::fetch_blogs(state.http(), keyword, page)
        })
        .await
}

/// # Errors
///
/// Returns an error if the request fails or the response is malformed.
#[instrument(skip(state))]
pub async fn use_blog(state: &AppState, id: &BlogId) -> QueryResult<Arc<DataResponse<BlogDetail>>> {
    let token = Token::current(state);
    state
        .queries()
        .fetch(blog_key(id), || {
            blog::fetch_blog(state.http(), id, token.as_deref())
        })
        .await
}

/// # Errors
///
/// Returns an error if the request fails or the response is malformed.
#[instrument(skip(state))]
pub async fn use_blog_comments(
    state: &AppState,
    id: &BlogId,
    page: Page,
) -> QueryResult<Arc<PageResponse<BlogComment>>> {
    state
        .queries()
        .fetch(blog_comments_key(id, page), || {
            blog::fetch_blog_comments(state.http(), id, page)
        })
        .await
}

/// Comment on a post; comment pages refetch afterwards.
///
/// # Errors
///
/// Returns an error if the body is invalid or the request fails.
#[instrument(skip(state, body), fields(blog_id = %body.blog_id))]
pub async fn use_create_blog_comment(
    state: &AppState,
    body: &CreateBlogComment,
) -> QueryResult<DataResponse<BlogComment>> {
    let token = Token::current(state);
    state
        .queries()
        .mutate(
            blog::create_blog_comment(state.http(), body, token.as_deref()),
            &[Resource::BlogComments],
        )
        .await
}

/// Toggle a reaction; the post and the lists showing its count refetch.
///
/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip(state, body), fields(blog_id = %body.blog_id))]
pub async fn use_react_blog(
    state: &AppState,
    body: &CreateBlogReact,
) -> QueryResult<DataResponse<BlogReaction>> {
    let token = Token::current(state);
    state
        .queries()
        .mutate(
            blog::react_blog(state.http(), body, token.as_deref()),
            &[Resource::Blog, Resource::Blogs],
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_separate_pages_and_keywords() {
        assert_ne!(blogs_key(None, Page::new(1, 10)), blogs_key(None, Page::new(2, 10)));
        assert_ne!(blogs_key(None, Page::default()), blogs_key(Some("rust"), Page::default()));
        assert_eq!(
            blog_comments_key(&BlogId::new("b1"), Page::default()).to_string(),
            r#"blog-comments[id="b1",page_size=10,page_index=1]"#
        );
    }
}
