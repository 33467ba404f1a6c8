//! Common test utilities for triage integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use triage_core::{Category, Faq, NewFaq, NewUser, User, UserRole};
use triage_service::{create_router, AppState, ServiceConfig};
use triage_store::MemStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct handle to the backing store, for seeding and log assertions.
    pub store: Arc<MemStore>,
}

impl TestHarness {
    /// Create a new test harness over a fresh in-memory store.
    pub fn new() -> Self {
        let store = Arc::new(MemStore::new());
        let state = AppState::new(store.clone(), ServiceConfig::default());
        let router: Router = create_router(state);
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, store }
    }

    /// Seed a category.
    pub async fn seed_category(&self, name: &str) -> Category {
        use triage_store::Store;
        self.store
            .insert_category(name)
            .await
            .expect("Failed to seed category")
    }

    /// Seed a FAQ under a category.
    pub async fn seed_faq(&self, category: &Category, question: &str, answer: &str) -> Faq {
        use triage_store::Store;
        self.store
            .insert_faq(&NewFaq {
                question: question.into(),
                answer: answer.into(),
                category_id: category.category_id,
                form_id: None,
                escalation_contact_id: None,
                target_user_type: None,
            })
            .await
            .expect("Failed to seed FAQ")
    }

    /// Seed an Admin-role staff user.
    pub async fn seed_admin(&self, full_name: &str, email: &str) -> User {
        use triage_store::Store;
        self.store
            .insert_user(&NewUser {
                full_name: full_name.into(),
                username: Some(email.split('@').next().unwrap_or("staff").into()),
                email: email.into(),
                phone: Some("410-455-0000".into()),
                password_hash: Some("$2b$10$test".into()),
                role: UserRole::Admin,
                user_type: None,
            })
            .await
            .expect("Failed to seed admin")
    }

    /// Seed a regular chatbot caller.
    pub async fn seed_caller(&self, full_name: &str, email: &str) -> User {
        use triage_store::Store;
        self.store
            .insert_user(&NewUser::caller(full_name.into(), email.into(), None, None))
            .await
            .expect("Failed to seed caller")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
