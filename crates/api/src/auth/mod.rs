//! Access-token validation and session cookies.

pub mod jwt;
pub mod session;
