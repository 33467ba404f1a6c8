//! FAQ and category types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CategoryId, FaqId, FormId, UserId};

/// A FAQ category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier.
    pub category_id: CategoryId,
    /// Display name.
    pub name: String,
}

/// A full FAQ record as stored.
#[derive(Debug, Clone, Serialize)]
pub struct Faq {
    /// Store-assigned identifier.
    pub faq_id: FaqId,
    /// The question text.
    pub question: String,
    /// The answer text.
    pub answer: String,
    /// Owning category.
    pub category_id: CategoryId,
    /// Attached form, if any.
    pub form_id: Option<FormId>,
    /// Preferred staff contact when this FAQ escalates.
    pub escalation_contact_id: Option<UserId>,
    /// Audience this FAQ targets (e.g. "Student").
    pub target_user_type: Option<String>,
    /// Last admin edit.
    pub last_updated: DateTime<Utc>,
}

/// Fields for inserting a new FAQ.
#[derive(Debug, Clone)]
pub struct NewFaq {
    /// The question text.
    pub question: String,
    /// The answer text.
    pub answer: String,
    /// Owning category.
    pub category_id: CategoryId,
    /// Attached form, if any.
    pub form_id: Option<FormId>,
    /// Preferred staff contact when this FAQ escalates.
    pub escalation_contact_id: Option<UserId>,
    /// Audience this FAQ targets.
    pub target_user_type: Option<String>,
}

/// A FAQ row joined with its category name, as presented to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqSummary {
    /// FAQ identifier.
    pub faq_id: FaqId,
    /// The question text.
    pub question: String,
    /// The answer text.
    pub answer: String,
    /// Owning category.
    pub category_id: CategoryId,
    /// Owning category's display name.
    pub category_name: String,
}

/// A ranked keyword-search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqHit {
    /// The matched FAQ.
    #[serde(flatten)]
    pub faq: FaqSummary,
    /// Relevance score; comparable only within one result set.
    pub relevance: f64,
}
