//! Repository for the `forum_post_likes` table.

use complio_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::forum::LikeToggle;

pub struct ForumLikeRepo;

impl ForumLikeRepo {
    /// Toggle a user's like on a post within a transaction.
    ///
    /// Removes the like if present, otherwise adds it. Returns `None` when
    /// the post does not exist.
    pub async fn toggle(
        pool: &PgPool,
        post_id: DbId,
        user_id: UserId,
    ) -> Result<Option<LikeToggle>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the post row so concurrent toggles on it serialize.
        let post: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM forum_posts WHERE id = $1 FOR UPDATE")
                .bind(post_id)
                .fetch_optional(&mut *tx)
                .await?;
        if post.is_none() {
            return Ok(None);
        }

        let removed = sqlx::query(
            "DELETE FROM forum_post_likes WHERE post_id = $1 AND user_id = $2",
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        if !removed {
            sqlx::query(
                "INSERT INTO forum_post_likes (post_id, user_id) VALUES ($1, $2) \
                 ON CONFLICT (post_id, user_id) DO NOTHING",
            )
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        let like_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM forum_post_likes WHERE post_id = $1")
                .bind(post_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(Some(LikeToggle {
            post_id,
            liked: !removed,
            like_count,
        }))
    }

    /// Number of likes on a post.
    pub async fn count_for_post(pool: &PgPool, post_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM forum_post_likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(pool)
            .await
    }

    /// Whether the user currently likes the post.
    pub async fn is_liked(
        pool: &PgPool,
        post_id: DbId,
        user_id: UserId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM forum_post_likes WHERE post_id = $1 AND user_id = $2)",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
