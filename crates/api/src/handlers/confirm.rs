//! Sign-in confirmation: `GET /auth/confirm` and `GET /auth/callback`.
//!
//! Exchanges an OAuth authorization code or verifies an email one-time
//! token, stores the resulting session in cookies, and sends the user either
//! to their requested page or to onboarding. Every outcome is a redirect;
//! failures land on `/auth/error` with the backend's message.

use async_trait::async_trait;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use complio_core::confirmation::{
    ConfirmationParams, Credential, RedirectTarget, MISSING_CREDENTIAL_MESSAGE, NO_USER_MESSAGE,
};
use complio_core::onboarding;
use complio_core::types::UserId;
use complio_db::repositories::OnboardingRepo;
use complio_db::DbPool;
use complio_supabase::{AuthBackend, Session};

use crate::auth::session;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Onboarding lookup seam
// ---------------------------------------------------------------------------

/// Reads the stored onboarding `completed` flag for a user.
#[async_trait]
pub trait OnboardingLookup: Send + Sync {
    /// `Ok(None)` when the user has no onboarding record.
    async fn completion_status(&self, user_id: UserId) -> Result<Option<bool>, sqlx::Error>;
}

#[async_trait]
impl OnboardingLookup for DbPool {
    async fn completion_status(&self, user_id: UserId) -> Result<Option<bool>, sqlx::Error> {
        OnboardingRepo::completion_status(self, user_id).await
    }
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

/// Result of a confirmation request.
#[derive(Debug)]
pub struct Confirmation {
    pub target: RedirectTarget,
    /// The session to persist; `None` whenever `target` is an error.
    pub session: Option<Session>,
}

impl Confirmation {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            target: RedirectTarget::error(message),
            session: None,
        }
    }
}

/// Run the confirmation flow for one credential.
///
/// Backend calls are made one at a time and never retried; the first
/// failure decides the redirect.
pub async fn resolve(
    auth: &dyn AuthBackend,
    onboarding: &dyn OnboardingLookup,
    credential: Credential,
    code_verifier: Option<&str>,
    next: String,
) -> Confirmation {
    let exchanged = match &credential {
        Credential::AuthorizationCode(code) => {
            auth.exchange_code_for_session(code, code_verifier).await
        }
        Credential::OneTimeToken {
            token_hash,
            otp_type,
        } => auth.verify_otp(token_hash, *otp_type).await,
        Credential::Missing => {
            tracing::debug!("Confirmation request carried no usable credential");
            return Confirmation::failed(MISSING_CREDENTIAL_MESSAGE);
        }
    };

    let session = match exchanged {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!(credential = credential.kind(), error = %err, "Sign-in confirmation failed");
            return Confirmation::failed(err.message());
        }
    };

    let target = check_onboarding_and_redirect(auth, onboarding, &session, next).await;
    let session = match target {
        RedirectTarget::Error(_) => None,
        _ => Some(session),
    };

    Confirmation { target, session }
}

/// Route a freshly signed-in user through the onboarding gate.
///
/// Only a stored `completed = true` releases the user to `next`; a missing
/// record or a failed lookup sends them to onboarding. A session that does
/// not resolve to a user is an error.
pub async fn check_onboarding_and_redirect(
    auth: &dyn AuthBackend,
    onboarding: &dyn OnboardingLookup,
    session: &Session,
    next: String,
) -> RedirectTarget {
    let user = match auth.get_user(&session.access_token).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!("New session did not resolve to a user");
            return RedirectTarget::error(NO_USER_MESSAGE);
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to fetch user for new session");
            return RedirectTarget::error(err.message());
        }
    };

    let completed = match onboarding.completion_status(user.id).await {
        Ok(completed) => completed,
        Err(err) => {
            tracing::warn!(user_id = %user.id, error = %err, "Onboarding lookup failed");
            None
        }
    };

    let target = onboarding::gate(completed, next);
    tracing::info!(user_id = %user.id, destination = target.kind(), "Sign-in confirmed");
    target
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// GET /auth/confirm, GET /auth/callback
///
/// Query: `code` | (`token_hash` + `type`), optional `next`.
/// A malformed query string is handled as an empty one.
pub async fn confirm(
    State(state): State<AppState>,
    jar: CookieJar,
    query: Result<Query<ConfirmationParams>, QueryRejection>,
) -> (CookieJar, Redirect) {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Malformed confirmation query");
            ConfirmationParams::default()
        }
    };

    let credential = Credential::from_params(&params);
    let next = params.next();
    let spends_verifier = matches!(credential, Credential::AuthorizationCode(_));
    let code_verifier = session::code_verifier(&jar);

    let confirmation = resolve(
        state.auth.as_ref(),
        &state.pool,
        credential,
        code_verifier.as_deref(),
        next,
    )
    .await;

    let mut jar = jar;
    if spends_verifier {
        jar = session::clear_code_verifier(jar);
    }
    if let Some(new_session) = &confirmation.session {
        jar = session::store_session(jar, new_session, &state.config.cookies);
    }

    (jar, Redirect::temporary(&confirmation.target.location()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
