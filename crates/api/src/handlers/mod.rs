pub mod auth;
pub mod confirm;
pub mod forum;
pub mod onboarding;
