//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, confirm};
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// GET  /confirm   -> confirm (email one-time token or authorization code)
/// GET  /callback  -> confirm (OAuth provider redirect URI)
/// POST /signout   -> sign_out
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/confirm", get(confirm::confirm))
        .route("/callback", get(confirm::confirm))
        .route("/signout", post(auth::sign_out))
}
