pub mod auth;
pub mod forum;
pub mod health;
pub mod onboarding;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /onboarding                  get, save step (auth required)
/// /onboarding/reset            reset progress (auth required)
///
/// /forum/posts                 create (auth required)
/// /forum/posts/{id}            get with like summary (auth required)
/// /forum/posts/{id}/like       toggle like (auth required)
/// ```
///
/// Browser-facing `/auth` routes and `/health` are mounted at the root by
/// [`crate::router::build_app_router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/onboarding", onboarding::router())
        .nest("/forum", forum::router())
}
