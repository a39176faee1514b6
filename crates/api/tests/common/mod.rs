//! Shared harness for API integration tests.
//!
//! Builds the real application router (same middleware stack as production)
//! over the per-test database pool that `#[sqlx::test]` provides, and offers
//! request helpers driving it through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use edupulse_api::auth::jwt::JwtConfig;
use edupulse_api::config::ServerConfig;
use edupulse_api::router::build_app_router;
use edupulse_api::state::AppState;

/// Deterministic configuration for tests; no environment reads.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application over the test pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Fire one request at the app and decode the JSON body (Null when empty).
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json_body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should not error at the transport level");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    request(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    request(app, Method::POST, uri, token, Some(body)).await
}

pub async fn patch_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    request(app, Method::PATCH, uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    request(app, Method::DELETE, uri, token, None).await
}

pub async fn delete_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    request(app, Method::DELETE, uri, token, Some(body)).await
}

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Register an account with the given role and return its access token.
pub async fn register_and_login(app: &Router, email: &str, role: &str) -> String {
    let (status, _) = post_json(
        app,
        "/api/v1/auth/register",
        None,
        json!({ "email": email, "password": TEST_PASSWORD, "role": role }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration of {email} failed");

    let (status, body) = post_json(
        app,
        "/api/v1/auth/login",
        None,
        json!({ "email": email, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login of {email} failed");
    body["access_token"]
        .as_str()
        .expect("login response should carry access_token")
        .to_string()
}

/// Create a course and a batch starting in the future; returns (course_id, batch_id).
pub async fn seed_course_and_batch(
    app: &Router,
    instructor_token: &str,
    max_seats: i32,
) -> (i64, i64) {
    let (status, course) = post_json(
        app,
        "/api/v1/courses",
        Some(instructor_token),
        json!({ "title": "Systems Programming", "price_cents": 9900 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "course creation failed");
    let course_id = course["id"].as_i64().unwrap();

    let (status, batch) = post_json(
        app,
        "/api/v1/batches",
        Some(instructor_token),
        json!({
            "course_id": course_id,
            "start_date": "2027-01-15T10:00:00Z",
            "max_seats": max_seats,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "batch creation failed");
    let batch_id = batch["id"].as_i64().unwrap();

    (course_id, batch_id)
}

/// Read a batch's current seat counter via the public endpoint.
pub async fn batch_enrolled_count(app: &Router, batch_id: i64) -> i64 {
    let (status, batch) = get(app, &format!("/api/v1/batches/{batch_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    batch["current_enrolled"].as_i64().unwrap()
}
