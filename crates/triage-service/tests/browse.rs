//! Phase 2 category browsing integration tests.

mod common;

use common::TestHarness;

use triage_store::Store;

#[tokio::test]
async fn browse_full_category_has_no_alternatives() {
    let harness = TestHarness::new();
    let cat = harness.seed_category("Advising").await;
    harness.seed_category("Graduation").await;
    for i in 0..3 {
        harness
            .seed_faq(&cat, &format!("Advising question {i}?"), "See an advisor.")
            .await;
    }
    let caller = harness.seed_caller("Pat Caller", "pat@example.edu").await;

    let response = harness
        .server
        .get(&format!("/categories/{}/faqs", cat.category_id))
        .add_query_param("query", "advising")
        .add_query_param("userId", caller.user_id.to_string())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["faqs"].as_array().unwrap().len(), 3);
    assert!(body["related_categories"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn browse_logs_first_faq_in_store_order() {
    let harness = TestHarness::new();
    let cat = harness.seed_category("Advising").await;
    let first = harness
        .seed_faq(&cat, "First question?", "First answer.")
        .await;
    harness
        .seed_faq(&cat, "Second question?", "Second answer.")
        .await;
    let caller = harness.seed_caller("Pat Caller", "pat@example.edu").await;

    harness
        .server
        .get(&format!("/categories/{}/faqs", cat.category_id))
        .add_query_param("query", "advising")
        .add_query_param("userId", caller.user_id.to_string())
        .await
        .assert_status_ok();

    let logs = harness.store.list_logs(10, 0).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status.as_str(), "ANSWERED_PHASE2");
    assert_eq!(logs[0].faq_id, Some(first.faq_id));
    assert_eq!(logs[0].category_id, Some(cat.category_id));
}

#[tokio::test]
async fn browse_thin_category_offers_alternatives() {
    let harness = TestHarness::new();
    let thin = harness.seed_category("Forms").await;
    harness.seed_category("Advising").await;
    harness.seed_category("Graduation").await;
    harness.seed_category("Accounts").await;
    harness.seed_category("Registration").await;
    harness
        .seed_faq(&thin, "Where are the forms?", "On the forms page.")
        .await;
    let caller = harness.seed_caller("Pat Caller", "pat@example.edu").await;

    let response = harness
        .server
        .get(&format!("/categories/{}/faqs", thin.category_id))
        .add_query_param("query", "forms")
        .add_query_param("userId", caller.user_id.to_string())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["faqs"].as_array().unwrap().len(), 1);

    let related = body["related_categories"].as_array().unwrap();
    assert_eq!(related.len(), 3);
    for category in related {
        assert_ne!(category["category_id"], thin.category_id.get());
    }
}

#[tokio::test]
async fn browse_empty_category_logs_failure() {
    let harness = TestHarness::new();
    let empty = harness.seed_category("Empty").await;
    harness.seed_category("Advising").await;
    let caller = harness.seed_caller("Pat Caller", "pat@example.edu").await;

    let response = harness
        .server
        .get(&format!("/categories/{}/faqs", empty.category_id))
        .add_query_param("query", "anything")
        .add_query_param("userId", caller.user_id.to_string())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["faqs"].as_array().unwrap().is_empty());
    assert!(!body["related_categories"].as_array().unwrap().is_empty());

    let logs = harness.store.list_logs(10, 0).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status.as_str(), "FAILED_PHASE2");
    assert!(logs[0].faq_id.is_none());
    assert_eq!(logs[0].category_id, Some(empty.category_id));
}

#[tokio::test]
async fn browse_unknown_category_fails() {
    let harness = TestHarness::new();
    let caller = harness.seed_caller("Pat Caller", "pat@example.edu").await;

    let response = harness
        .server
        .get("/categories/999/faqs")
        .add_query_param("query", "anything")
        .add_query_param("userId", caller.user_id.to_string())
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn browse_requires_query_and_user_id() {
    let harness = TestHarness::new();
    let cat = harness.seed_category("Advising").await;

    harness
        .server
        .get(&format!("/categories/{}/faqs", cat.category_id))
        .add_query_param("userId", "1")
        .await
        .assert_status_bad_request();

    harness
        .server
        .get(&format!("/categories/{}/faqs", cat.category_id))
        .add_query_param("query", "advising")
        .await
        .assert_status_bad_request();
}
