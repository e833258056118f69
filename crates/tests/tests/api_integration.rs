use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use campus_api::{build_app_with_config, ApiConfig};
use campus_core::{response_for, ResponseCategory};
use campus_tests::{get, post_json, send, test_app, test_config};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn health_reports_metrics() {
    let (status, body) = send(test_app(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["metrics"]["requests_total"], 0);
}

#[tokio::test]
async fn catalog_lists_cards_and_prompts() {
    let (status, body) = send(test_app(), get("/v1/catalog")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hero"]["title"], "Smart Campus Assistant");
    assert_eq!(body["categories"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["quick_prompts"][1], "Show me the dining hall menu");
    assert_eq!(body["chat_panel"]["assistant_name"], "Campus Assistant");
}

#[tokio::test]
async fn respond_returns_first_matching_category() {
    let (status, body) = send(
        test_app(),
        post_json(
            "/v1/respond",
            json!({ "text": "Where is the computer science building?" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "facilities");
    assert_eq!(body["reply"], response_for(ResponseCategory::Facilities));
}

#[tokio::test]
async fn respond_accepts_empty_text() {
    let (status, body) = send(test_app(), post_json("/v1/respond", json!({ "text": "" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "default");
}

#[tokio::test]
async fn chat_starts_transcript_and_schedules_reply() {
    let (status, body) = send(
        test_app(),
        post_json("/v1/chat", json!({ "text": "Show me the dining hall menu" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "dining");
    assert_eq!(body["reply"], response_for(ResponseCategory::Dining));

    let delay = body["reply_after_ms"].as_u64().expect("numeric delay");
    assert!((1_000..=2_000).contains(&delay));

    let messages = body["transcript"]["messages"]
        .as_array()
        .expect("messages array");
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["sender"], "assistant");
    assert_eq!(messages[1]["sender"], "user");
    assert_eq!(messages[1]["content"], "Show me the dining hall menu");
    assert_eq!(messages[2]["sender"], "assistant");
    assert_eq!(body["transcript"]["pending_replies"], 0);
}

#[tokio::test]
async fn chat_continues_client_transcript() {
    let app = test_app();

    let (_, first) = send(
        app.clone(),
        post_json("/v1/chat", json!({ "text": "parking permit" })),
    )
    .await;
    let (status, second) = send(
        app,
        post_json(
            "/v1/chat",
            json!({ "text": "LIBRARY hours?", "transcript": first["transcript"] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["category"], "library");
    let messages = second["transcript"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[0]["id"], first["transcript"]["messages"][0]["id"]);
}

#[tokio::test]
async fn chat_rejects_blank_text() {
    let (status, body) = send(test_app(), post_json("/v1/chat", json!({ "text": "   " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "empty_text");
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let response = test_app().oneshot(get("/v1/catalog")).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn rate_limit_blocks_excess_requests_but_not_health() {
    let app = build_app_with_config(&ApiConfig {
        rate_limit_window: Duration::from_secs(60),
        rate_limit_max: 2,
        ..test_config()
    });

    for _ in 0..2 {
        let (status, _) = send(app.clone(), post_json("/v1/respond", json!({ "text": "map" }))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(post_json("/v1/respond", json!({ "text": "map" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("retry-after"));

    let (status, _) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn rate_limit_budgets_are_per_client() {
    let app = build_app_with_config(&ApiConfig {
        rate_limit_window: Duration::from_secs(60),
        rate_limit_max: 1,
        ..test_config()
    });

    let from = |client: &str| {
        let mut request = post_json("/v1/respond", json!({ "text": "library" }));
        request
            .headers_mut()
            .insert("x-forwarded-for", client.parse().unwrap());
        request
    };

    let (status, _) = send(app.clone(), from("203.0.113.10")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(app.clone(), from("203.0.113.10")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "rate_limited");

    let (status, body) = send(app, from("198.51.100.20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "library");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let text = "a".repeat(70 * 1024);
    let response = test_app()
        .oneshot(post_json("/v1/respond", json!({ "text": text })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn malformed_json_gets_json_error_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from("{\"text\": "))
        .unwrap();
    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_json");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));

    let (status, body) = send(
        test_app(),
        post_json("/v1/respond", json!({ "question": "map" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_json");
}
