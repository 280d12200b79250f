//! Unit tests for the secret key middleware and request logging.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{HeaderValue, Request, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower::ServiceExt;

use crate::{
    authorize, extract_secret_key, request_logging, require_secret_key, AuthRejection,
    SecretKeyConfig,
};

const SECRET: &str = "s3cret";

fn protected_app() -> Router {
    Router::new()
        .route("/messages/count", get(|| async { "ok" }))
        .route_layer(from_fn_with_state(
            Arc::new(SecretKeyConfig::new(SECRET)),
            require_secret_key,
        ))
        .layer(from_fn(request_logging))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[test]
fn test_verify_matches_only_exact_secret() {
    let config = SecretKeyConfig::new(SECRET);
    assert!(config.verify(SECRET));
    assert!(!config.verify("s3cre"));
    assert!(!config.verify("s3cret!"));
    assert!(!config.verify(""));
}

#[test]
fn test_debug_redacts_secret() {
    let rendered = format!("{:?}", SecretKeyConfig::new(SECRET));
    assert!(!rendered.contains(SECRET));
}

#[test]
fn test_extract_prefers_header_over_query() {
    let req = Request::builder()
        .uri("/messages/count?api_key=from-query")
        .header("X-API-Key", "from-header")
        .body(Body::empty())
        .unwrap();
    assert_eq!(extract_secret_key(&req), Ok(Some("from-header".to_string())));

    let req = Request::builder()
        .uri("/messages/count?start_date=2024-01-01&api_key=from-query")
        .body(Body::empty())
        .unwrap();
    assert_eq!(extract_secret_key(&req), Ok(Some("from-query".to_string())));

    let req = Request::builder()
        .uri("/messages/count")
        .body(Body::empty())
        .unwrap();
    assert_eq!(extract_secret_key(&req), Ok(None));
}

#[test]
fn test_authorize_outcomes() {
    let config = SecretKeyConfig::new(SECRET);
    let with_key = |key: &str| {
        Request::builder()
            .uri("/")
            .header("x-api-key", key)
            .body(Body::empty())
            .unwrap()
    };

    assert_eq!(authorize(&config, &with_key(SECRET)), Ok(()));
    assert_eq!(authorize(&config, &with_key("wrong")), Err(AuthRejection::Invalid));
    assert_eq!(authorize(&config, &with_key("")), Err(AuthRejection::Missing));
}

#[tokio::test]
async fn test_missing_key_returns_401() {
    let response = protected_app()
        .oneshot(Request::get("/messages/count").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(response).await.contains("Missing secret key"));
}

#[tokio::test]
async fn test_wrong_key_returns_403() {
    let response = protected_app()
        .oneshot(
            Request::get("/messages/count")
                .header("x-api-key", "nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(body_text(response).await.contains("Invalid secret key"));
}

#[test]
fn test_non_ascii_header_is_invalid_not_missing() {
    let config = SecretKeyConfig::new(SECRET);
    let req = Request::builder()
        .uri("/messages/count?api_key=s3cret")
        .header("x-api-key", HeaderValue::from_bytes(b"s3cr\xe9t").unwrap())
        .body(Body::empty())
        .unwrap();

    assert_eq!(extract_secret_key(&req), Err(AuthRejection::Invalid));
    assert_eq!(authorize(&config, &req), Err(AuthRejection::Invalid));
}

#[tokio::test]
async fn test_non_ascii_header_returns_403() {
    let response = protected_app()
        .oneshot(
            Request::get("/messages/count")
                .header("x-api-key", HeaderValue::from_bytes(b"\xff\xfe").unwrap())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(body_text(response).await.contains("Invalid secret key"));
}

#[tokio::test]
async fn test_valid_key_reaches_handler() {
    let response = protected_app()
        .oneshot(
            Request::get(format!("/messages/count?api_key={}", SECRET))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_unknown_route_is_not_gated() {
    let response = protected_app()
        .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
