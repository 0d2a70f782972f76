//! REST client for the GoTrue endpoints used by sign-in confirmation.
//!
//! Wraps `/auth/v1/token`, `/auth/v1/verify`, `/auth/v1/user` and
//! `/auth/v1/logout` using [`reqwest`].

use async_trait::async_trait;
use complio_core::confirmation::OtpType;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{extract_message, SupabaseError};
use crate::types::{Session, User};
use crate::AuthBackend;

/// Connection settings for the hosted project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co` (no trailing slash).
    pub url: String,
    /// Public anon key, sent as the `apikey` header on every request.
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Load the project settings from environment variables.
    ///
    /// | Env Var             | Required |
    /// |---------------------|----------|
    /// | `SUPABASE_URL`      | **yes**  |
    /// | `SUPABASE_ANON_KEY` | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if either variable is missing or empty.
    pub fn from_env() -> Self {
        let url = std::env::var("SUPABASE_URL").expect("SUPABASE_URL must be set");
        assert!(!url.is_empty(), "SUPABASE_URL must not be empty");

        let anon_key =
            std::env::var("SUPABASE_ANON_KEY").expect("SUPABASE_ANON_KEY must be set");
        assert!(!anon_key.is_empty(), "SUPABASE_ANON_KEY must not be empty");

        Self::new(url, anon_key)
    }

    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }
}

/// HTTP client for the project's auth API.
pub struct SupabaseAuth {
    client: reqwest::Client,
    config: SupabaseConfig,
}

impl SupabaseAuth {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.config.url)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.endpoint(path))
            .header("apikey", &self.config.anon_key)
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or a
    /// [`SupabaseError::Api`] carrying the backend's message.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SupabaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SupabaseError::Api {
            status: status.as_u16(),
            message: extract_message(status, &body),
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SupabaseError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AuthBackend for SupabaseAuth {
    async fn exchange_code_for_session(
        &self,
        auth_code: &str,
        code_verifier: Option<&str>,
    ) -> Result<Session, SupabaseError> {
        // GoTrue refuses a PKCE grant without a verifier; fail before the round trip.
        let code_verifier = code_verifier
            .filter(|v| !v.is_empty())
            .ok_or(SupabaseError::MissingCodeVerifier)?;

        let body = json!({
            "auth_code": auth_code,
            "code_verifier": code_verifier,
        });

        let response = self
            .request(reqwest::Method::POST, "/token")
            .query(&[("grant_type", "pkce")])
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn verify_otp(
        &self,
        token_hash: &str,
        otp_type: OtpType,
    ) -> Result<Session, SupabaseError> {
        let body = json!({
            "type": otp_type,
            "token_hash": token_hash,
        });

        let response = self
            .request(reqwest::Method::POST, "/verify")
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<User>, SupabaseError> {
        let response = self
            .request(reqwest::Method::GET, "/user")
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            tracing::debug!(status = status.as_u16(), "Auth backend rejected access token");
            return Ok(None);
        }

        Self::parse_response(response).await.map(Some)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        let response = self
            .request(reqwest::Method::POST, "/logout")
            .query(&[("scope", "global")])
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::ensure_success(response).await.map(|_| ())
    }
}
