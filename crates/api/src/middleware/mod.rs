//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in user from a backend access token.

pub mod auth;
