//! Client for the hosted Supabase auth backend (GoTrue).
//!
//! The API crate talks to the backend only through the [`AuthBackend`]
//! trait, so handlers can be exercised against in-memory fakes.

pub mod auth;
pub mod error;
pub mod types;

use async_trait::async_trait;
use complio_core::confirmation::OtpType;

pub use auth::{SupabaseAuth, SupabaseConfig};
pub use error::SupabaseError;
pub use types::{Session, User};

/// Session-issuing operations of the hosted auth backend.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange an OAuth / PKCE authorization code for a session.
    async fn exchange_code_for_session(
        &self,
        auth_code: &str,
        code_verifier: Option<&str>,
    ) -> Result<Session, SupabaseError>;

    /// Verify a hashed email one-time token, yielding a session.
    async fn verify_otp(
        &self,
        token_hash: &str,
        otp_type: OtpType,
    ) -> Result<Session, SupabaseError>;

    /// Resolve the user owning an access token.
    ///
    /// Returns `Ok(None)` when the backend does not recognise the token.
    async fn get_user(&self, access_token: &str) -> Result<Option<User>, SupabaseError>;

    /// Revoke the session behind an access token.
    async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError>;
}
