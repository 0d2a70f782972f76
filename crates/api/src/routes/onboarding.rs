//! Route definitions for user onboarding.
//!
//! Mounted at `/onboarding` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Onboarding routes.
///
/// ```text
/// GET    /           -> get_onboarding
/// PUT    /           -> save_onboarding (upsert one step)
/// POST   /reset      -> reset_onboarding
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(onboarding::get_onboarding).put(onboarding::save_onboarding),
        )
        .route("/reset", post(onboarding::reset_onboarding))
}
