//! Integration tests for the root routes and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, body_text, get};
use lexa_api::router::REQUEST_ID_HEADER;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let (app, _state) = common::build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["workers"], 2);
    assert_eq!(json["queued"], 0);
    assert_eq!(json["queue_capacity"], 64);
    assert_eq!(json["jobs"]["total"], 0);
}

// ---------------------------------------------------------------------------
// Test: GET / returns the plain-text banner
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_returns_banner() {
    let (app, _state) = common::build_test_app();
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, lexa_api::routes::health::BANNER);
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let (app, _state) = common::build_test_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let (app, _state) = common::build_test_app();
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .expect("Response must contain an x-request-id header");

    // A hyphenated UUID.
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

// ---------------------------------------------------------------------------
// Test: a client-supplied request id is echoed back
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_request_id_is_propagated() {
    let (app, _state) = common::build_test_app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(REQUEST_ID_HEADER, "trace-me-123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-me-123");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight allows job creation from the configured origin only
// ---------------------------------------------------------------------------

async fn preflight(app: axum::Router, origin: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/jobs")
        .header("origin", origin)
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let (app, _state) = common::build_test_app();
    let response = preflight(app, "http://localhost:5173").await;

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
    let methods = response.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(methods.contains("POST"));
    assert!(!methods.contains("DELETE"));
}

#[tokio::test]
async fn cors_preflight_ignores_unknown_origin() {
    let (app, _state) = common::build_test_app();
    let response = preflight(app, "http://evil.example").await;

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
