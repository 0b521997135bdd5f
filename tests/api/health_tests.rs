//! Health, info and metrics endpoint tests

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn liveness_returns_alive() {
    let app = TestApp::new();

    let body: Value = app.server.get("/health/live").await.json();

    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn readiness_reports_unreachable_database() {
    let app = TestApp::new();

    let response = app.server.get("/health/ready").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn info_returns_server_time() {
    let app = TestApp::new();

    let body: Value = app.server.get("/api/info").await.json();

    assert_eq!(body["message"], "ok");
    assert!(body["time"].as_str().is_some());
}

#[tokio::test]
async fn metrics_count_routed_requests() {
    let app = TestApp::new();
    app.server.get("/health").await;

    let response = app.server.get("/metrics").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let text = response.text();
    assert!(text.contains("travel_planner_http_requests_total"));
    assert!(text.contains(r#"path="/health""#));
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = TestApp::new();

    let response = app.server.get("/health").await;

    let headers = response.headers();
    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    assert!(headers.get(header::STRICT_TRANSPORT_SECURITY).is_none());
}
