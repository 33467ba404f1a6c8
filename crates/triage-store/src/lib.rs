//! Storage layer for the helpdesk triage service.
//!
//! This crate provides persistent storage for users, categories, FAQs,
//! forms, and interaction logs behind the [`Store`] trait. Two backends are
//! provided:
//!
//! - [`PgStore`]: PostgreSQL via a bounded sqlx connection pool, with
//!   full-text relevance ranking and embedded migrations.
//! - [`MemStore`]: an in-memory implementation with the same semantics,
//!   used by integration tests and local development.
//!
//! All query parameters are bound, never interpolated into SQL text.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod mem;
pub mod pg;

pub use error::{Result, StoreError};
pub use mem::MemStore;
pub use pg::PgStore;

use async_trait::async_trait;

use triage_core::{
    Category, CategoryId, Faq, FaqHit, FaqSummary, LogEntry, LogId, NewFaq, NewLog, NewUser, User,
    UserId,
};

/// The storage trait defining all database operations used by the triage
/// flow.
///
/// Each call acquires a connection from the backend's pool for its duration
/// and releases it on every exit path, success or error.
#[async_trait]
pub trait Store: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Get a user by id.
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Look up a user by exact email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Look up a user matching either the email or the full name, first row
    /// in store order.
    ///
    /// The OR match is deliberately loose: two distinct people sharing a
    /// full name will resolve to the same record. Callers rely on the
    /// documented behavior, so this must not be tightened silently.
    async fn find_user_by_email_or_name(
        &self,
        email: &str,
        full_name: &str,
    ) -> Result<Option<User>>;

    /// Insert a new user record, returning the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateEmail`] if the email is taken.
    async fn insert_user(&self, user: &NewUser) -> Result<User>;

    /// Pick a uniformly random Admin-role user, if any exist.
    async fn random_admin(&self) -> Result<Option<User>>;

    // =========================================================================
    // Category Operations
    // =========================================================================

    /// Get a category by id.
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>>;

    /// List all categories in store order.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Insert a new category.
    async fn insert_category(&self, name: &str) -> Result<Category>;

    /// Distinct categories owning FAQs whose question/answer text
    /// relevance-matches `query`, capped at `limit`.
    async fn categories_for_matching_faqs(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<Category>>;

    /// Categories whose name contains `fragment` (case-insensitive), capped
    /// at `limit`.
    async fn categories_by_name(&self, fragment: &str, limit: i64) -> Result<Vec<Category>>;

    /// Up to `limit` categories other than `exclude`, in store order.
    async fn other_categories(&self, exclude: CategoryId, limit: i64) -> Result<Vec<Category>>;

    // =========================================================================
    // FAQ Operations
    // =========================================================================

    /// Relevance-ranked full-text search over FAQ question and answer text.
    ///
    /// Returns at most `limit` hits ordered by non-increasing relevance.
    async fn search_faqs(&self, query: &str, limit: i64) -> Result<Vec<FaqHit>>;

    /// All FAQs of one category in store order (no ranking).
    async fn faqs_in_category(&self, category: CategoryId) -> Result<Vec<FaqSummary>>;

    /// Insert a new FAQ.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the owning category is absent.
    async fn insert_faq(&self, faq: &NewFaq) -> Result<Faq>;

    // =========================================================================
    // Log Operations
    // =========================================================================

    /// Append an interaction log row, returning its id.
    async fn insert_log(&self, log: &NewLog) -> Result<LogId>;

    /// Attach the final response and status to an existing log row.
    ///
    /// Used exactly once per escalation, against the row id returned by
    /// [`Store::insert_log`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the row does not exist.
    async fn update_log_outcome(
        &self,
        id: LogId,
        response: &str,
        status: triage_core::LogStatus,
    ) -> Result<()>;

    /// Get a log row by id.
    async fn get_log(&self, id: LogId) -> Result<Option<LogEntry>>;

    /// List log rows, newest first.
    async fn list_logs(&self, limit: i64, offset: i64) -> Result<Vec<LogEntry>>;
}
