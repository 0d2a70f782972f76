//! Repository for the `user_onboarding` table.

use complio_core::onboarding::STEP_PROFILE;
use complio_core::types::UserId;
use sqlx::PgPool;

use crate::models::onboarding::{SaveOnboardingStep, UserOnboarding};

/// Column list for `user_onboarding` queries.
const COLUMNS: &str = "\
    user_id, current_step, responses, completed, completed_at, \
    created_at, updated_at";

/// Reads and writes per-user onboarding progress.
pub struct OnboardingRepo;

impl OnboardingRepo {
    /// Fetch the onboarding record for a user, if one exists.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<UserOnboarding>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_onboarding WHERE user_id = $1");
        sqlx::query_as::<_, UserOnboarding>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch only the `completed` flag. `None` when the user has no record.
    pub async fn completion_status(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT completed FROM user_onboarding WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Record one onboarding step (upsert).
    ///
    /// - `current_step` is set to the saved step.
    /// - `responses` is merged into the stored object with `||`.
    /// - `completed` is OR-ed in; `completed_at` keeps its first value.
    pub async fn save_step(
        pool: &PgPool,
        user_id: UserId,
        input: &SaveOnboardingStep,
    ) -> Result<UserOnboarding, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_onboarding (user_id, current_step, responses, completed, completed_at) \
             VALUES ($1, $2, $3, $4, CASE WHEN $4::boolean THEN NOW() ELSE NULL END) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 current_step = EXCLUDED.current_step, \
                 responses = user_onboarding.responses || EXCLUDED.responses, \
                 completed = user_onboarding.completed OR EXCLUDED.completed, \
                 completed_at = COALESCE(user_onboarding.completed_at, EXCLUDED.completed_at), \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserOnboarding>(&query)
            .bind(user_id)
            .bind(&input.step)
            .bind(&input.responses)
            .bind(input.completed)
            .fetch_one(pool)
            .await
    }

    /// Reset a user's onboarding progress to the first step.
    ///
    /// Returns `None` if the user has no record.
    pub async fn reset(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<UserOnboarding>, sqlx::Error> {
        let query = format!(
            "UPDATE user_onboarding \
             SET current_step = $2, \
                 responses = '{{}}'::jsonb, \
                 completed = FALSE, \
                 completed_at = NULL, \
                 updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserOnboarding>(&query)
            .bind(user_id)
            .bind(STEP_PROFILE)
            .fetch_optional(pool)
            .await
    }
}
