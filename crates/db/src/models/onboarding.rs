//! User onboarding entity model and DTOs.

use complio_core::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `user_onboarding` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserOnboarding {
    pub user_id: UserId,
    pub current_step: String,
    pub responses: serde_json::Value,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for saving one onboarding step.
///
/// `responses` is merged into the stored object; `completed` can only turn
/// the record's flag on, never off.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveOnboardingStep {
    #[validate(length(min = 1, max = 64))]
    pub step: String,
    #[serde(default = "empty_object")]
    pub responses: serde_json::Value,
    #[serde(default)]
    pub completed: bool,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
