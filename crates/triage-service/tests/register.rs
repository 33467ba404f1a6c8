//! Caller registration integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn register_new_caller_created() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/register")
        .json(&json!({
            "fullName": "Pat Caller",
            "userEmail": "pat@example.edu",
            "userPhone": "410-555-0101",
            "userType": "Student"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["full_name"], "Pat Caller");
    assert_eq!(body["user"]["role"], "User");
    // Credentials never appear in responses.
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn register_existing_email_returns_existing_user() {
    let harness = TestHarness::new();
    let existing = harness.seed_caller("Pat Caller", "pat@example.edu").await;

    let response = harness
        .server
        .post("/register")
        .json(&json!({
            "fullName": "Someone Else",
            "userEmail": "pat@example.edu"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "User already registered");
    assert_eq!(body["user"]["user_id"], existing.user_id.get());
    assert_eq!(body["user"]["full_name"], "Pat Caller");
}

#[tokio::test]
async fn register_missing_fields_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/register")
        .json(&json!({ "fullName": "Pat Caller" }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("fullName and userEmail"));
}

#[tokio::test]
async fn register_blank_fields_fail() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/register")
        .json(&json!({ "fullName": "  ", "userEmail": "" }))
        .await;

    response.assert_status_bad_request();
}
