mod config;
mod rate_limit;

use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use campus_agents::{Answer, CampusAssistant};
use campus_core::{catalog, ResponseCategory, Transcript, TurnError};
use campus_observability::AppMetrics;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use config::{ApiConfig, ConfigError};
pub use rate_limit::ClientRateLimiter;

const MAX_BODY_BYTES: usize = 64 * 1024;
const MAX_TRANSCRIPT_MESSAGES: usize = 200;

#[derive(Clone)]
pub struct ApiState {
    pub assistant: Arc<CampusAssistant>,
    pub metrics: Arc<AppMetrics>,
    pub limiter: ClientRateLimiter,
    pub allowed_origins: Arc<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: campus_observability::MetricsSnapshot,
}

#[derive(Debug, Deserialize)]
struct RespondRequest {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    text: String,
    #[serde(default)]
    transcript: Option<Transcript>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    category: ResponseCategory,
    reply: String,
    reply_after_ms: u64,
    transcript: Transcript,
}

pub fn build_app_with_config(config: &ApiConfig) -> Router {
    let metrics = AppMetrics::shared();
    let assistant = Arc::new(
        CampusAssistant::new(config.pacing, metrics.clone()).with_match_mode(config.match_mode),
    );

    let state = ApiState {
        assistant,
        metrics,
        limiter: ClientRateLimiter::new(config.rate_limit_window, config.rate_limit_max),
        allowed_origins: Arc::new(config.allowed_origins.clone()),
    };

    build_router(state)
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/catalog", get(catalog_handler))
        .route("/v1/respond", post(respond))
        .route("/v1/chat", post(chat))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn catalog_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(catalog()))
}

async fn respond(
    State(state): State<ApiState>,
    payload: Result<Json<RespondRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    let answer: Answer = state.assistant.answer(&request.text);
    (StatusCode::OK, Json(answer)).into_response()
}

async fn chat(
    State(state): State<ApiState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    let mut transcript = request
        .transcript
        .unwrap_or_else(|| state.assistant.start_transcript());

    let directive = match state.assistant.handle_turn(&mut transcript, &request.text) {
        Ok(directive) => directive,
        Err(TurnError::EmptyUtterance) => {
            return json_error(
                StatusCode::BAD_REQUEST,
                "empty_text",
                "text must contain at least one non-whitespace character",
            );
        }
    };

    // The client shows the reply after `reply_after_ms`; the server does not wait.
    state.assistant.deliver(&mut transcript, &directive);
    transcript.retain_recent(MAX_TRANSCRIPT_MESSAGES);

    (
        StatusCode::OK,
        Json(ChatResponse {
            category: directive.category,
            reply: directive.content,
            reply_after_ms: directive.delay_ms,
            transcript,
        }),
    )
        .into_response()
}

fn json_error(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": code,
            "message": message,
        })),
    )
        .into_response()
}

fn rejection_response(rejection: JsonRejection) -> Response {
    let status = rejection.status();
    let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "payload_too_large"
    } else {
        "invalid_json"
    };
    json_error(status, code, &rejection.body_text())
}

fn build_cors_layer(allowed_origins: &Arc<Vec<String>>) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn rate_limit_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let ip = request_ip(&request);
    if let Err(retry_after) = state.limiter.check(&ip) {
        tracing::warn!(client = %ip, "rate limit exceeded");
        let mut response = json_error(
            StatusCode::TOO_MANY_REQUESTS,
            "rate_limited",
            "rate limit exceeded for this client",
        );
        let seconds = retry_after.as_secs().max(1);
        if let Ok(value) = HeaderValue::from_str(&seconds.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        return response;
    }

    next.run(request).await
}

fn request_ip(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "local".to_string())
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
