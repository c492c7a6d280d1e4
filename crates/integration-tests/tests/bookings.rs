//! Booking creation and status changes over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use tranquil_integration_tests::TestApp;

fn booking_body() -> Value {
    json!({
        "userId": 1,
        "sessionType": "ai",
        "date": "2024-06-01",
        "time": "9:00 AM"
    })
}

#[tokio::test]
async fn test_create_booking_defaults_to_pending() {
    let app = TestApp::empty();
    let resp = app.post("/api/bookings", booking_body()).await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["id"], 1);
    assert_eq!(resp.body["status"], "pending");
    assert_eq!(resp.body["sessionType"], "ai");
    assert_eq!(resp.body["date"], "2024-06-01");
    assert_eq!(resp.body["time"], "9:00 AM");
    assert!(resp.body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_booking_keeps_optional_fields() {
    let app = TestApp::empty();
    let resp = app
        .post(
            "/api/bookings",
            json!({
                "sessionType": "human",
                "therapistName": "Dr. Sarah Johnson",
                "date": "2024-07-15",
                "time": "2:00 PM",
                "notes": "First session",
                "status": "confirmed"
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["therapistName"], "Dr. Sarah Johnson");
    assert_eq!(resp.body["notes"], "First session");
    assert_eq!(resp.body["status"], "confirmed");
    assert_eq!(resp.body["userId"], Value::Null);
}

#[tokio::test]
async fn test_create_booking_validation() {
    let app = TestApp::empty();

    let resp = app.post("/api/bookings", json!({ "sessionType": "ai" })).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Invalid booking data");
    let mut paths = resp.error_paths();
    paths.sort();
    assert_eq!(paths, ["date", "time"]);

    let resp = app
        .post(
            "/api/bookings",
            json!({ "sessionType": "spa", "date": "June 1st", "time": "9:00 AM" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let mut paths = resp.error_paths();
    paths.sort();
    assert_eq!(paths, ["date", "sessionType"]);

    assert!(app.get("/api/bookings").await.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_booking() {
    let app = TestApp::empty();
    app.post("/api/bookings", booking_body()).await;

    let resp = app.get("/api/bookings/1").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["sessionType"], "ai");

    let resp = app.get("/api/bookings/2").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["message"], "Booking not found");

    assert_eq!(app.get("/api/bookings/xyz").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_status() {
    let app = TestApp::empty();
    let created = app.post("/api/bookings", booking_body()).await.body;

    let resp = app
        .patch("/api/bookings/1/status", json!({ "status": "confirmed" }))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["status"], "confirmed");
    assert_eq!(resp.body["createdAt"], created["createdAt"]);
    assert_eq!(resp.body["time"], created["time"]);

    let resp = app.get("/api/bookings/1").await;
    assert_eq!(resp.body["status"], "confirmed");
}

#[tokio::test]
async fn test_update_status_missing_booking() {
    let app = TestApp::empty();
    let resp = app
        .patch("/api/bookings/999/status", json!({ "status": "confirmed" }))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["message"], "Booking not found");
}

#[tokio::test]
async fn test_update_status_requires_status() {
    let app = TestApp::empty();
    app.post("/api/bookings", booking_body()).await;

    let resp = app.patch("/api/bookings/1/status", json!({})).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_paths(), ["status"]);
}

/// Only the four lifecycle statuses are accepted.
#[tokio::test]
async fn test_update_status_rejects_unknown_values() {
    let app = TestApp::empty();
    app.post("/api/bookings", booking_body()).await;

    let resp = app
        .patch("/api/bookings/1/status", json!({ "status": "archived" }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_paths(), ["status"]);
    assert_eq!(resp.body["errors"][0]["code"], "invalid_enum_value");

    let resp = app.get("/api/bookings/1").await;
    assert_eq!(resp.body["status"], "pending");
}

#[tokio::test]
async fn test_bookings_by_user() {
    let app = TestApp::empty();
    app.post("/api/bookings", booking_body()).await;
    let mut other = booking_body();
    other["userId"] = json!(2);
    app.post("/api/bookings", other).await;

    let resp = app.get("/api/users/2/bookings").await;
    assert_eq!(resp.status, StatusCode::OK);
    let bookings = resp.body.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["id"], 2);

    assert_eq!(app.get("/api/bookings").await.body.as_array().unwrap().len(), 2);
    assert_eq!(app.get("/api/users/3/bookings").await.body, json!([]));
}
