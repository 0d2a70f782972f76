//! Handlers for the `/auth` resource besides confirmation.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::session;
use crate::state::AppState;

/// POST /auth/signout
///
/// Revoke the session with the backend and clear the session cookies.
/// Backend failures are logged, not surfaced: the cookies are cleared
/// regardless. Returns 204 No Content.
pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    if let Some(token) = session::access_token(&headers, &jar) {
        if let Err(err) = state.auth.sign_out(&token).await {
            tracing::warn!(error = %err, "Backend sign-out failed");
        }
    }

    (session::clear_session(jar), StatusCode::NO_CONTENT)
}
