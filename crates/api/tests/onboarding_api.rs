mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{
    body_json, build_test_app, get, get_auth, json_auth, post_auth, redirect_location, token_for,
    FakeAuth, FAKE_USER_ID,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn app(pool: PgPool) -> axum::Router {
    build_test_app(pool, Arc::new(FakeAuth::default()))
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_onboarding_requires_auth(pool: PgPool) {
    let response = get(app(pool), "/api/v1/onboarding").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_onboarding_rejects_bad_token(pool: PgPool) {
    let response = get_auth(app(pool), "/api/v1/onboarding", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// GET / PUT
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_without_record_is_not_started(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let response = get_auth(app(pool), "/api/v1/onboarding", &token_for(user_id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], user_id.to_string());
    assert!(json["data"]["current_step"].is_null());
    assert_eq!(json["data"]["completed"], false);
    assert_eq!(json["data"]["responses"], json!({}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_steps_merges_responses(pool: PgPool) {
    let token = token_for(Uuid::new_v4());

    let response = json_auth(
        app(pool.clone()),
        Method::PUT,
        "/api/v1/onboarding",
        &token,
        json!({ "step": "profile", "responses": { "full_name": "Ada Lovelace" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = json_auth(
        app(pool.clone()),
        Method::PUT,
        "/api/v1/onboarding",
        &token,
        json!({ "step": "organization", "responses": { "org_name": "Analytical Engines" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(app(pool), "/api/v1/onboarding", &token).await).await;
    assert_eq!(json["data"]["current_step"], "organization");
    assert_eq!(json["data"]["responses"]["full_name"], "Ada Lovelace");
    assert_eq!(json["data"]["responses"]["org_name"], "Analytical Engines");
    assert_eq!(json["data"]["completed"], false);
    assert!(json["data"]["completed_at"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completion_is_sticky(pool: PgPool) {
    let token = token_for(Uuid::new_v4());

    let response = json_auth(
        app(pool.clone()),
        Method::PUT,
        "/api/v1/onboarding",
        &token,
        json!({ "step": "notifications", "completed": true }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["completed"], true);
    assert!(json["data"]["completed_at"].is_string());

    let response = json_auth(
        app(pool),
        Method::PUT,
        "/api/v1/onboarding",
        &token,
        json!({ "step": "profile", "responses": { "job_title": "Analyst" } }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["current_step"], "profile");
    assert_eq!(json["data"]["completed"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_invalid_step_is_rejected(pool: PgPool) {
    let response = json_auth(
        app(pool),
        Method::PUT,
        "/api/v1/onboarding",
        &token_for(Uuid::new_v4()),
        json!({ "step": "billing" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_non_object_responses_is_rejected(pool: PgPool) {
    let response = json_auth(
        app(pool),
        Method::PUT,
        "/api/v1/onboarding",
        &token_for(Uuid::new_v4()),
        json!({ "step": "profile", "responses": ["a", "b"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_without_record_is_not_found(pool: PgPool) {
    let response = post_auth(
        app(pool),
        "/api/v1/onboarding/reset",
        &token_for(Uuid::new_v4()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_clears_progress(pool: PgPool) {
    let token = token_for(Uuid::new_v4());

    json_auth(
        app(pool.clone()),
        Method::PUT,
        "/api/v1/onboarding",
        &token,
        json!({ "step": "notifications", "responses": { "sms": false }, "completed": true }),
    )
    .await;

    let response = post_auth(app(pool), "/api/v1/onboarding/reset", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["current_step"], "profile");
    assert_eq!(json["data"]["completed"], false);
    assert_eq!(json["data"]["responses"], json!({}));
    assert!(json["data"]["completed_at"].is_null());
}

// ---------------------------------------------------------------------------
// Interaction with sign-in
// ---------------------------------------------------------------------------

/// Finishing onboarding through the API releases the next sign-in to `next`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completed_onboarding_releases_sign_in(pool: PgPool) {
    let before = get(app(pool.clone()), "/auth/confirm?code=good-code&next=/projects").await;
    assert_eq!(redirect_location(&before), "/onboarding");

    let response = json_auth(
        app(pool.clone()),
        Method::PUT,
        "/api/v1/onboarding",
        &token_for(FAKE_USER_ID),
        json!({ "step": "notifications", "completed": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let after = get(app(pool), "/auth/confirm?code=good-code&next=/projects").await;
    assert_eq!(redirect_location(&after), "/projects");
}

/// The session cookie set by sign-in authenticates API calls.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_cookie_authenticates(pool: PgPool) {
    let token = token_for(FAKE_USER_ID);
    let response = common::get_with_cookie(
        app(pool),
        "/api/v1/onboarding",
        &format!("complio-access-token={token}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], FAKE_USER_ID.to_string());
}
