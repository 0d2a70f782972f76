//! Handlers for user onboarding.
//!
//! These endpoints write the record the sign-in onboarding gate reads. All
//! require authentication.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use complio_core::error::CoreError;
use complio_core::onboarding;
use complio_core::types::{Timestamp, UserId};
use complio_db::models::onboarding::{SaveOnboardingStep, UserOnboarding};
use complio_db::repositories::OnboardingRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Onboarding state as returned to the client.
#[derive(Debug, Serialize)]
pub struct OnboardingView {
    pub user_id: UserId,
    /// `None` until the first step is saved.
    pub current_step: Option<String>,
    pub responses: serde_json::Value,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
}

impl OnboardingView {
    fn not_started(user_id: UserId) -> Self {
        Self {
            user_id,
            current_step: None,
            responses: serde_json::json!({}),
            completed: false,
            completed_at: None,
        }
    }
}

impl From<UserOnboarding> for OnboardingView {
    fn from(record: UserOnboarding) -> Self {
        Self {
            user_id: record.user_id,
            current_step: Some(record.current_step),
            responses: record.responses,
            completed: record.completed,
            completed_at: record.completed_at,
        }
    }
}

// ---------------------------------------------------------------------------
// GET /onboarding
// ---------------------------------------------------------------------------

/// Get the caller's onboarding state; a user with no record sees the
/// not-started state.
pub async fn get_onboarding(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let view = OnboardingRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .map(OnboardingView::from)
        .unwrap_or_else(|| OnboardingView::not_started(auth.user_id));

    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// PUT /onboarding
// ---------------------------------------------------------------------------

/// Save one onboarding step, creating the record on first save.
pub async fn save_onboarding(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SaveOnboardingStep>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    onboarding::validate_step(&input.step)?;
    onboarding::validate_responses(&input.responses)?;

    let record = OnboardingRepo::save_step(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = %auth.user_id,
        step = %record.current_step,
        completed = record.completed,
        "Onboarding step saved"
    );

    Ok(Json(DataResponse {
        data: OnboardingView::from(record),
    }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/reset
// ---------------------------------------------------------------------------

/// Reset the caller's onboarding progress back to the first step.
pub async fn reset_onboarding(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let record = OnboardingRepo::reset(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Onboarding",
            id: auth.user_id.to_string(),
        })?;

    tracing::info!(user_id = %auth.user_id, "Onboarding state reset");

    Ok(Json(DataResponse {
        data: OnboardingView::from(record),
    }))
}
