//! Handlers for forum posts and likes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use complio_core::error::CoreError;
use complio_core::types::DbId;
use complio_db::models::forum::{CreateForumPost, ForumPostWithLikes};
use complio_db::repositories::{ForumLikeRepo, ForumPostRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn post_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ForumPost",
        id: id.to_string(),
    })
}

/// POST /forum/posts
pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateForumPost>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let post = ForumPostRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(user_id = %auth.user_id, post_id = post.id, "Forum post created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /forum/posts/{id}
///
/// The post with its like count and whether the caller likes it.
pub async fn get_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = ForumPostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or_else(|| post_not_found(post_id))?;

    let like_count = ForumLikeRepo::count_for_post(&state.pool, post_id).await?;
    let liked = ForumLikeRepo::is_liked(&state.pool, post_id, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: ForumPostWithLikes {
            post,
            like_count,
            liked,
        },
    }))
}

/// POST /forum/posts/{id}/like
///
/// Like the post if the caller has not, otherwise remove the like.
pub async fn toggle_like(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let toggle = ForumLikeRepo::toggle(&state.pool, post_id, auth.user_id)
        .await?
        .ok_or_else(|| post_not_found(post_id))?;

    tracing::debug!(
        user_id = %auth.user_id,
        post_id,
        liked = toggle.liked,
        "Forum like toggled"
    );

    Ok(Json(DataResponse { data: toggle }))
}
