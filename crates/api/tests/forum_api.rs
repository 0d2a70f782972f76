mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, get_auth, json_auth, post_auth, token_for, FakeAuth};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn app(pool: PgPool) -> axum::Router {
    build_test_app(pool, Arc::new(FakeAuth::default()))
}

/// Create a post as `token` and return its id.
async fn create_post(pool: PgPool, token: &str) -> i64 {
    let response = json_auth(
        app(pool),
        Method::POST,
        "/api/v1/forum/posts",
        token,
        json!({ "title": "SOC 2 evidence tips", "body": "Automate screenshots." }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_post(pool: PgPool) {
    let author = Uuid::new_v4();
    let response = json_auth(
        app(pool),
        Method::POST,
        "/api/v1/forum/posts",
        &token_for(author),
        json!({ "title": "Vendor reviews", "body": "How often?" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Vendor reviews");
    assert_eq!(json["data"]["author_id"], author.to_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_post_empty_title_rejected(pool: PgPool) {
    let response = json_auth(
        app(pool),
        Method::POST,
        "/api/v1/forum/posts",
        &token_for(Uuid::new_v4()),
        json!({ "title": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_like_twice(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let post_id = create_post(pool.clone(), &token).await;
    let uri = format!("/api/v1/forum/posts/{post_id}/like");

    let json = body_json(post_auth(app(pool.clone()), &uri, &token).await).await;
    assert_eq!(json["data"]["liked"], true);
    assert_eq!(json["data"]["like_count"], 1);

    let json = body_json(post_auth(app(pool), &uri, &token).await).await;
    assert_eq!(json["data"]["liked"], false);
    assert_eq!(json["data"]["like_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_post_reports_likes_for_caller(pool: PgPool) {
    let author = token_for(Uuid::new_v4());
    let reader = token_for(Uuid::new_v4());
    let post_id = create_post(pool.clone(), &author).await;

    post_auth(
        app(pool.clone()),
        &format!("/api/v1/forum/posts/{post_id}/like"),
        &reader,
    )
    .await;

    let uri = format!("/api/v1/forum/posts/{post_id}");

    let json = body_json(get_auth(app(pool.clone()), &uri, &reader).await).await;
    assert_eq!(json["data"]["like_count"], 1);
    assert_eq!(json["data"]["liked"], true);

    let json = body_json(get_auth(app(pool), &uri, &author).await).await;
    assert_eq!(json["data"]["like_count"], 1);
    assert_eq!(json["data"]["liked"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_post_is_not_found(pool: PgPool) {
    let token = token_for(Uuid::new_v4());

    let response = get_auth(app(pool.clone()), "/api/v1/forum/posts/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_auth(app(pool), "/api/v1/forum/posts/999999/like", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_forum_requires_auth(pool: PgPool) {
    let response = common::get(app(pool), "/api/v1/forum/posts/1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
