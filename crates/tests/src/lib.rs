//! Helpers shared by the HTTP integration tests.

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use campus_api::{build_app_with_config, ApiConfig};
use campus_core::ReplyPacing;
use serde_json::Value;
use tower::ServiceExt;

pub fn test_config() -> ApiConfig {
    ApiConfig {
        rate_limit_window: Duration::from_secs(60),
        rate_limit_max: 1_000,
        pacing: ReplyPacing::default(),
        ..ApiConfig::default()
    }
}

pub fn test_app() -> Router {
    build_app_with_config(&test_config())
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

/// Sends one request and returns the status with the JSON body (`Null` when empty).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let parsed = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, parsed)
}
