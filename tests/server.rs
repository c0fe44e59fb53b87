#![allow(clippy::unwrap_used, clippy::expect_used)]

//! The demo server router built from `Config`, including the HTTP stack.

use std::sync::Arc;

use access_token_auth::app::{build_router, build_state};
use access_token_auth::config::Config;
use access_token_auth::services::auth::{
    AuthRegistry, SCHEME, StrategyConfig, factory::STRATEGY_NAME,
};
use access_token_auth::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

fn config_with(payload: bool, extra: &[(&str, &str)]) -> Config {
    Config::from_lookup(|key| {
        if let Some((_, v)) = extra.iter().find(|(k, _)| *k == key) {
            return Some(v.to_string());
        }
        match key {
            "ACCESS_TOKEN_KEY_NAME" => Some("fishface".to_string()),
            "ACCESS_TOKEN_PROFILE_URL" => {
                Some("http://www.google.co.uk/?access_token=".to_string())
            }
            "ACCESS_TOKEN_PAYLOAD" => Some(payload.to_string()),
            "ACCESS_TOKENS" => Some("barry:Barry White".to_string()),
            _ => None,
        }
    })
    .unwrap()
}

fn config(payload: bool) -> Config {
    config_with(payload, &[])
}

/// Full server stack around a custom validation strategy.
fn app_with_strategy(strategy: StrategyConfig, config: &Config) -> Router {
    let mut registry = AuthRegistry::new();
    registry
        .register_strategy(STRATEGY_NAME, SCHEME, strategy)
        .unwrap();
    let state = AppState::new(Arc::new(registry), config.auth_payload_limit_bytes);
    build_router(state, config).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    let raw = body.to_string();
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, raw.len())
        .body(Body::from(raw))
        .unwrap()
}

fn app(payload: bool) -> Router {
    let config = config(payload);
    let state = build_state(&config).unwrap();
    build_router(state, &config).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let request_id = res
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, request_id, body)
}

#[tokio::test]
async fn health_is_public() {
    let req = Request::get("/api/v1/health").body(Body::empty()).unwrap();
    let (status, request_id, body) = send(app(false), req).await;

    assert_eq!(status, StatusCode::OK);
    assert!(request_id.is_some());
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn me_with_query_token() {
    let req = Request::get("/api/v1/me?fishface=barry")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app(false), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["strategy"], json!("access-token"));
    assert_eq!(body["credentials"], json!({"name": "Barry White"}));
}

#[tokio::test]
async fn me_with_unknown_token() {
    let req = Request::get("/api/v1/me?fishface=nobody")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app(false), req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], json!("UNAUTHORIZED"));
}

#[tokio::test]
async fn me_with_payload_token() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/me")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"fishface": "barry", "terry": "shpongle"}).to_string(),
        ))
        .unwrap();
    let (status, _, body) = send(app(true), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["credentials"]["name"], json!("Barry White"));
    assert_eq!(body["payload"]["terry"], json!("shpongle"));
}

#[tokio::test]
async fn payload_token_ignored_when_strategy_disables_payload() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/me")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"fishface": "barry"}).to_string()))
        .unwrap();
    let (status, _, _) = send(app(false), req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_with_form_payload_token() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/me")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("fishface=barry&terry=shpongle"))
        .unwrap();
    let (status, _, body) = send(app(true), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["credentials"]["name"], json!("Barry White"));
    assert_eq!(body["payload"]["terry"], json!("shpongle"));
}

#[tokio::test]
async fn over_limit_payload_is_bad_request() {
    let config = config_with(true, &[("AUTH_PAYLOAD_LIMIT_BYTES", "16")]);
    let state = build_state(&config).unwrap();
    let app = build_router(state, &config).unwrap();

    let req = post_json(
        "/api/v1/me",
        json!({"fishface": "barry", "terry": "shpongle"}),
    );
    let (status, _, body) = send(app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("INVALID_PAYLOAD"));
}

#[tokio::test]
async fn payload_within_limit_passes() {
    let config = config_with(true, &[("AUTH_PAYLOAD_LIMIT_BYTES", "64")]);
    let state = build_state(&config).unwrap();
    let app = build_router(state, &config).unwrap();

    let (status, _, body) = send(
        app,
        post_json("/api/v1/me", json!({"fishface": "barry"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["credentials"]["name"], json!("Barry White"));
}

#[tokio::test]
async fn panicking_callback_is_a_server_error() {
    let config = config(false);
    let strategy = StrategyConfig::builder()
        .access_token_key_name("fishface")
        .validate_func(|_payload, _token, _reply, _request| panic!("validation backend exploded"))
        .build()
        .unwrap();
    let app = app_with_strategy(strategy, &config);

    let req = Request::get("/api/v1/me?fishface=barry")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(app, req).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unresolved_callback_times_out() {
    let config = config_with(false, &[("REQUEST_TIMEOUT_SECONDS", "1")]);
    let strategy = StrategyConfig::builder()
        .access_token_key_name("fishface")
        .validate_func(|_payload, _token, reply, _request| {
            Box::pin(async move {
                std::future::pending::<()>().await;
                Ok(reply.proceed())
            })
        })
        .build()
        .unwrap();
    let app = app_with_strategy(strategy, &config);

    let req = Request::get("/api/v1/me?fishface=barry")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(app, req).await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}
