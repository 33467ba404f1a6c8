//! Error types for triage storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Referenced record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind ("user", "category", "faq", "log").
        entity: &'static str,
        /// The missing row id.
        id: i64,
    },

    /// Email already registered (unique constraint).
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
}

impl StoreError {
    pub(crate) fn database(err: &sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
