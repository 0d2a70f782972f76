//! Repository for the `forum_posts` table.

use complio_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::forum::{CreateForumPost, ForumPost};

const COLUMNS: &str = "id, author_id, title, body, created_at, updated_at";

pub struct ForumPostRepo;

impl ForumPostRepo {
    /// Insert a new post, returning the created row.
    pub async fn create(
        pool: &PgPool,
        author_id: UserId,
        input: &CreateForumPost,
    ) -> Result<ForumPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO forum_posts (author_id, title, body) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ForumPost>(&query)
            .bind(author_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ForumPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forum_posts WHERE id = $1");
        sqlx::query_as::<_, ForumPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
