//! Forum post and like models.

use complio_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `forum_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ForumPost {
    pub id: DbId,
    pub author_id: UserId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a forum post. The author comes from the session.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateForumPost {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub body: String,
}

/// A post together with its like summary for the requesting user.
#[derive(Debug, Clone, Serialize)]
pub struct ForumPostWithLikes {
    #[serde(flatten)]
    pub post: ForumPost,
    pub like_count: i64,
    pub liked: bool,
}

/// Result of toggling a like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikeToggle {
    pub post_id: DbId,
    /// Whether the caller likes the post after the toggle.
    pub liked: bool,
    pub like_count: i64,
}
