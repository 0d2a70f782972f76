//! Route definitions for the forum.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::forum;
use crate::state::AppState;

/// Routes mounted at `/forum`.
///
/// ```text
/// POST /posts              -> create_post
/// GET  /posts/{id}         -> get_post
/// POST /posts/{id}/like    -> toggle_like
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", post(forum::create_post))
        .route("/posts/{id}", get(forum::get_post))
        .route("/posts/{id}/like", post(forum::toggle_like))
}
