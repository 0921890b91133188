//! Blog posts, comments and reactions.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{BlogId, CommentId, UserId};

/// Author block embedded in posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: UserId,
    pub username: String,
    pub avatar: Option<String>,
}

/// Blog post as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    pub thumbnail: String,
    pub summary: String,
    pub author: Author,
    pub react_count: u32,
    pub comment_count: u32,
    pub created_at: String,
}

/// Full blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDetail {
    #[serde(flatten)]
    pub blog: Blog,
    /// HTML body of the post.
    pub content: String,
    /// Whether the requesting user has reacted to the post.
    pub is_reacted: bool,
}

/// A comment under a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogComment {
    pub id: CommentId,
    pub blog_id: BlogId,
    pub content: String,
    pub user: Author,
    pub created_at: String,
}

/// Reaction state after toggling a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogReaction {
    pub blog_id: BlogId,
    pub is_reacted: bool,
    pub react_count: u32,
}

/// Body of `POST blog-comments`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBlogComment {
    pub blog_id: BlogId,
    #[validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))]
    pub content: String,
}

/// Body of `POST blog-reacts`. Posting toggles the caller's reaction.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBlogReact {
    pub blog_id: BlogId,
}
