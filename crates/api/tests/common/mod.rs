#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use complio_api::auth::jwt::{generate_access_token, JwtConfig};
use complio_api::auth::session::CookieConfig;
use complio_api::config::ServerConfig;
use complio_api::router::build_app_router;
use complio_api::state::AppState;
use complio_core::confirmation::OtpType;
use complio_supabase::{AuthBackend, Session, SupabaseConfig, SupabaseError, User};

/// User every accepted credential signs in as.
pub const FAKE_USER_ID: Uuid = Uuid::from_u128(0x8d0f_d2b3_9ca7_4d9e_a95f_9e13_dded_323e);

pub const GOOD_CODE: &str = "good-code";
pub const GOOD_TOKEN_HASH: &str = "good-hash";
pub const EXCHANGE_FAILURE: &str = "Invalid code verifier";
pub const VERIFY_FAILURE: &str = "Email link is invalid or has expired";

/// Stand-in for the hosted auth backend.
///
/// Accepts [`GOOD_CODE`] and [`GOOD_TOKEN_HASH`]; everything else fails
/// with the messages the real backend uses. Calls are recorded.
#[derive(Default)]
pub struct FakeAuth {
    pub calls: Mutex<Vec<String>>,
}

impl FakeAuth {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn fake_session() -> Session {
    Session {
        access_token: "fake-access".into(),
        refresh_token: "fake-refresh".into(),
        token_type: "bearer".into(),
        expires_in: 3600,
        user: None,
    }
}

#[async_trait]
impl AuthBackend for FakeAuth {
    async fn exchange_code_for_session(
        &self,
        auth_code: &str,
        code_verifier: Option<&str>,
    ) -> Result<Session, SupabaseError> {
        self.record(format!(
            "exchange:{auth_code}:{}",
            code_verifier.unwrap_or("-")
        ));
        if auth_code == GOOD_CODE {
            Ok(fake_session())
        } else {
            Err(SupabaseError::Api {
                status: 400,
                message: EXCHANGE_FAILURE.into(),
            })
        }
    }

    async fn verify_otp(
        &self,
        token_hash: &str,
        otp_type: OtpType,
    ) -> Result<Session, SupabaseError> {
        self.record(format!("verify:{token_hash}:{otp_type}"));
        if token_hash == GOOD_TOKEN_HASH {
            Ok(fake_session())
        } else {
            Err(SupabaseError::Api {
                status: 403,
                message: VERIFY_FAILURE.into(),
            })
        }
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<User>, SupabaseError> {
        self.record("get_user".into());
        Ok((access_token == "fake-access").then(|| User {
            id: FAKE_USER_ID,
            email: Some("ada@example.com".into()),
            role: Some("authenticated".into()),
        }))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        self.record(format!("sign_out:{access_token}"));
        Ok(())
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and non-`Secure` cookies.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        supabase: SupabaseConfig::new("http://127.0.0.1:9", "test-anon-key"),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            audience: "authenticated".to_string(),
        },
        cookies: CookieConfig {
            secure: false,
            refresh_max_age_days: 30,
        },
    }
}

/// Build the full application router, mirroring `main.rs`, with the given
/// pool and auth backend.
pub fn build_test_app(pool: PgPool, auth: Arc<FakeAuth>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        auth,
    };
    build_app_router(state, &config)
}

/// A valid access token for `user_id`.
pub fn token_for(user_id: Uuid) -> String {
    generate_access_token(user_id, Some("ada@example.com"), &test_config().jwt, 3600)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn json_auth(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Redirect helpers
// ---------------------------------------------------------------------------

/// Assert a 307 and return its `Location`.
pub fn redirect_location(response: &Response) -> String {
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    response
        .headers()
        .get(LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// All `Set-Cookie` header values on a response.
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// The `Set-Cookie` value for a given cookie name, if any.
pub fn set_cookie(response: &Response, name: &str) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with(&format!("{name}=")))
}
