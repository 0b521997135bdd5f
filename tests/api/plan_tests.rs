//! Plan, place and sub-resource API tests
//!
//! Cover the paths decided before any query runs: authentication and
//! request validation.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;
use uuid::Uuid;

use crate::common::TestApp;

#[test_case("/api/plans/me" ; "my plans")]
#[test_case("/api/places" ; "places")]
#[test_case("/api/plans/00000000-0000-0000-0000-000000000001/places" ; "plan places")]
#[test_case("/api/plans/00000000-0000-0000-0000-000000000001/places/tree" ; "plan place tree")]
#[test_case("/api/plans/00000000-0000-0000-0000-000000000001/basic-info" ; "basic info")]
#[test_case("/api/plans/00000000-0000-0000-0000-000000000001/bookings" ; "bookings")]
#[test_case("/api/plans/00000000-0000-0000-0000-000000000001/checklist" ; "checklist")]
#[test_case("/api/plans/00000000-0000-0000-0000-000000000001/members" ; "members")]
#[tokio::test]
async fn protected_routes_require_token(path: &str) {
    let app = TestApp::new();

    let response = app.server.get(path).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn creating_plan_requires_token() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/plans")
        .json(&json!({ "title": "Lisbon", "statusId": 1, "isPublic": false }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn place_coordinates_are_validated() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/places")
        .authorization_bearer(app.token())
        .json(&json!({ "name": "Nowhere", "lat": 91.0, "lng": 200.0 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["lat", "lng"]);
}

#[tokio::test]
async fn nested_place_payload_is_validated() {
    let app = TestApp::new();
    let plan_id = Uuid::new_v4();

    let response = app
        .server
        .post(&format!("/api/plans/{}/places", plan_id))
        .authorization_bearer(app.token())
        .json(&json!({ "place": { "name": "Pier", "lat": -95.0 }, "level": 0 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["field"], "place.lat");
}

#[tokio::test]
async fn negative_level_is_rejected() {
    let app = TestApp::new();
    let plan_id = Uuid::new_v4();

    let response = app
        .server
        .post(&format!("/api/plans/{}/places", plan_id))
        .authorization_bearer(app.token())
        .json(&json!({ "placesId": Uuid::new_v4(), "level": -1 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn booking_currency_is_validated() {
    let app = TestApp::new();
    let plan_id = Uuid::new_v4();

    let response = app
        .server
        .post(&format!("/api/plans/{}/bookings", plan_id))
        .authorization_bearer(app.token())
        .json(&json!({
            "kind": "Hotel",
            "name": "Casa do Mar",
            "startDate": "2025-06-01",
            "endDate": "2025-06-04",
            "amount": 320.0,
            "currency": "EURO"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_plan_id_is_rejected() {
    let app = TestApp::new();

    let response = app
        .server
        .get("/api/plans/not-a-uuid/bookings")
        .authorization_bearer(app.token())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
