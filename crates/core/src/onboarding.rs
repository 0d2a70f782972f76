//! Onboarding gate and step validation.
//!
//! Signed-in users are held on the onboarding flow until their record says
//! `completed = true`. The save endpoint records progress one step at a time.

use crate::confirmation::RedirectTarget;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Personal details (name, job title).
pub const STEP_PROFILE: &str = "profile";
/// Organization name, size and industry.
pub const STEP_ORGANIZATION: &str = "organization";
/// Compliance frameworks the organization tracks.
pub const STEP_COMPLIANCE_AREAS: &str = "compliance_areas";
/// Notification channels and reminder preferences.
pub const STEP_NOTIFICATIONS: &str = "notifications";

/// All valid onboarding steps, in flow order.
pub const VALID_STEPS: &[&str] = &[
    STEP_PROFILE,
    STEP_ORGANIZATION,
    STEP_COMPLIANCE_AREAS,
    STEP_NOTIFICATIONS,
];

/// Validate that a step name is one of [`VALID_STEPS`].
pub fn validate_step(step: &str) -> Result<(), CoreError> {
    if VALID_STEPS.contains(&step) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid onboarding step '{step}'. Must be one of: {VALID_STEPS:?}"
        )))
    }
}

/// Step responses are merged key-by-key, so they must be a JSON object.
pub fn validate_responses(responses: &serde_json::Value) -> Result<(), CoreError> {
    if responses.is_object() {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Onboarding responses must be a JSON object".to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Decide where a freshly signed-in user goes.
///
/// `completed` is the stored flag, `None` when no record exists or the
/// lookup failed. Only an explicit `Some(true)` releases the user to `next`.
pub fn gate(completed: Option<bool>, next: String) -> RedirectTarget {
    match completed {
        Some(true) => RedirectTarget::Next(next),
        _ => RedirectTarget::Onboarding,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
