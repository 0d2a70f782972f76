//! Domain logic for the compl.io backend.
//!
//! Everything here is pure: no network, no database. The API crate feeds
//! request data in and turns the results into HTTP responses.

pub mod confirmation;
pub mod error;
pub mod onboarding;
pub mod types;
