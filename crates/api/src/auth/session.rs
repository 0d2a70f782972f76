//! Browser session cookies.
//!
//! A confirmed sign-in stores the backend's access and refresh tokens in
//! HttpOnly cookies; API requests may present the access token either as a
//! Bearer header or through that cookie.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use complio_supabase::Session;

pub const ACCESS_TOKEN_COOKIE: &str = "complio-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "complio-refresh-token";
/// PKCE verifier. The browser-side client writes it before starting an
/// OAuth or magic-link flow; this service only reads and expires it.
pub const CODE_VERIFIER_COOKIE: &str = "complio-code-verifier";

/// Default refresh cookie lifetime in days.
const DEFAULT_REFRESH_MAX_AGE_DAYS: i64 = 30;

/// Attributes applied to session cookies.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Set the `Secure` attribute (default: `true`).
    pub secure: bool,
    /// Refresh cookie lifetime in days (default: `30`).
    pub refresh_max_age_days: i64,
}

impl CookieConfig {
    /// Load cookie settings from environment variables.
    ///
    /// | Env Var                       | Default |
    /// |-------------------------------|---------|
    /// | `COOKIE_SECURE`               | `true`  |
    /// | `REFRESH_COOKIE_MAX_AGE_DAYS` | `30`    |
    pub fn from_env() -> Self {
        let secure: bool = std::env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("COOKIE_SECURE must be true or false");

        let refresh_max_age_days: i64 = std::env::var("REFRESH_COOKIE_MAX_AGE_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_MAX_AGE_DAYS.to_string())
            .parse()
            .expect("REFRESH_COOKIE_MAX_AGE_DAYS must be a valid i64");

        Self {
            secure,
            refresh_max_age_days,
        }
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: true,
            refresh_max_age_days: DEFAULT_REFRESH_MAX_AGE_DAYS,
        }
    }
}

fn session_cookie(
    name: &'static str,
    value: String,
    max_age: time::Duration,
    config: &CookieConfig,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Write the session's tokens into the jar.
pub fn store_session(jar: CookieJar, session: &Session, config: &CookieConfig) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        session.access_token.clone(),
        time::Duration::seconds(session.expires_in),
        config,
    ))
    .add(session_cookie(
        REFRESH_TOKEN_COOKIE,
        session.refresh_token.clone(),
        time::Duration::days(config.refresh_max_age_days),
        config,
    ))
}

/// Expire both session cookies.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_TOKEN_COOKIE).path("/"))
}

/// Expire the PKCE verifier once it has been spent.
pub fn clear_code_verifier(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(CODE_VERIFIER_COOKIE).path("/"))
}

/// The PKCE verifier, if the frontend left one.
pub fn code_verifier(jar: &CookieJar) -> Option<String> {
    jar.get(CODE_VERIFIER_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// The caller's access token: `Authorization: Bearer` first, then the
/// session cookie.
pub fn access_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    jar.get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
