//! Phase 3 staff escalation integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

use triage_core::LogId;
use triage_store::Store;

#[tokio::test]
async fn escalate_creates_caller_and_returns_admin_contact() {
    let harness = TestHarness::new();
    let admin = harness.seed_admin("Casey Staff", "casey@cs.umbc.edu").await;

    let response = harness
        .server
        .post("/query")
        .json(&json!({
            "queryText": "help",
            "fullName": "A B",
            "userEmail": "a@b.com"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["fallback_contact"]["full_name"], "Casey Staff");
    assert_eq!(body["fallback_contact"]["email"], "casey@cs.umbc.edu");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("casey@cs.umbc.edu"));

    // A new caller was created and returned for future turns.
    let user_id = body["user_id"].as_i64().unwrap();
    assert_ne!(user_id, admin.user_id.get());
    let created = harness
        .store
        .find_user_by_email("a@b.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.user_id.get(), user_id);
    assert_eq!(created.full_name, "A B");

    // Two writes against one log row: inserted NO_ANSWER, finalized ESCALATED.
    let log_id = LogId::new(body["log_id"].as_i64().unwrap());
    let row = harness.store.get_log(log_id).await.unwrap().unwrap();
    assert_eq!(row.status.as_str(), "ESCALATED");
    assert_eq!(row.response.as_deref(), body["message"].as_str());
    assert!(row.faq_id.is_none());
    assert_eq!(harness.store.list_logs(10, 0).await.unwrap().len(), 1);
}

#[tokio::test]
async fn escalate_without_staff_synthesizes_helpdesk_contact() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/query")
        .json(&json!({
            "queryText": "help",
            "fullName": "A B",
            "userEmail": "a@b.com"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["fallback_contact"]["full_name"], "CSEE Helpdesk");
    assert_eq!(body["fallback_contact"]["email"], "dept@cs.umbc.edu");
    assert_eq!(body["fallback_contact"]["phone"], "410-455-3500");
}

#[tokio::test]
async fn escalate_reuses_existing_caller_by_email() {
    let harness = TestHarness::new();
    let existing = harness.seed_caller("A B", "a@b.com").await;

    let response = harness
        .server
        .post("/query")
        .json(&json!({
            "queryText": "help",
            "fullName": "Different Name",
            "userEmail": "a@b.com"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["user_id"].as_i64().unwrap(), existing.user_id.get());
}

#[tokio::test]
async fn escalate_matches_by_full_name_too() {
    // The email-OR-name lookup is deliberately loose; a caller supplying a
    // known name with a fresh email resolves to the existing record.
    let harness = TestHarness::new();
    let existing = harness.seed_caller("A B", "a@b.com").await;

    let response = harness
        .server
        .post("/query")
        .json(&json!({
            "queryText": "help",
            "fullName": "A B",
            "userEmail": "fresh@b.com"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["user_id"].as_i64().unwrap(), existing.user_id.get());
}

#[tokio::test]
async fn escalate_uses_explicit_user_id() {
    let harness = TestHarness::new();
    let caller = harness.seed_caller("A B", "a@b.com").await;

    let response = harness
        .server
        .post("/query")
        .json(&json!({
            "queryText": "help",
            "userId": caller.user_id.get()
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["user_id"].as_i64().unwrap(), caller.user_id.get());
}

#[tokio::test]
async fn escalate_records_selected_category() {
    let harness = TestHarness::new();
    let cat = harness.seed_category("Advising").await;
    let caller = harness.seed_caller("A B", "a@b.com").await;

    let response = harness
        .server
        .post("/query")
        .json(&json!({
            "queryText": "help",
            "userId": caller.user_id.get(),
            "categoryId": cat.category_id.get()
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let log_id = LogId::new(body["log_id"].as_i64().unwrap());
    let row = harness.store.get_log(log_id).await.unwrap().unwrap();
    assert_eq!(row.category_id, Some(cat.category_id));
}

#[tokio::test]
async fn escalate_unknown_category_fails() {
    let harness = TestHarness::new();
    let caller = harness.seed_caller("A B", "a@b.com").await;

    let response = harness
        .server
        .post("/query")
        .json(&json!({
            "queryText": "help",
            "userId": caller.user_id.get(),
            "categoryId": 999
        }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn escalate_blank_query_text_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/query")
        .json(&json!({
            "queryText": "   ",
            "fullName": "A B",
            "userEmail": "a@b.com"
        }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("queryText"));
}

#[tokio::test]
async fn escalate_blank_identity_fields_fail() {
    let harness = TestHarness::new();

    // Blank strings are not an identity; no junk caller may be created.
    let response = harness
        .server
        .post("/query")
        .json(&json!({
            "queryText": "help",
            "fullName": "",
            "userEmail": "  "
        }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("userId or both fullName and userEmail"));
    assert!(harness
        .store
        .find_user_by_email("")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn escalate_without_identity_fails() {
    let harness = TestHarness::new();

    // Name without email is not enough.
    let response = harness
        .server
        .post("/query")
        .json(&json!({
            "queryText": "help",
            "fullName": "A B"
        }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("userId or both fullName and userEmail"));
}
