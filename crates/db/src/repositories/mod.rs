//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod forum_like_repo;
pub mod forum_post_repo;
pub mod onboarding_repo;

pub use forum_like_repo::ForumLikeRepo;
pub use forum_post_repo::ForumPostRepo;
pub use onboarding_repo::OnboardingRepo;
