//! Interaction log types.
//!
//! One log row is written per triage attempt. Rows are append-only with one
//! exception: the escalation flow inserts a `NO_ANSWER` row before the
//! fallback contact is known and updates that same row to `ESCALATED` once
//! the response message is computed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CategoryId, FaqId, LogId, UserId};

/// Outcome of a triage attempt.
///
/// One canonical literal per outcome; the store persists the
/// SCREAMING_SNAKE string forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogStatus {
    /// Phase 1 keyword search produced an answer.
    #[serde(rename = "ANSWERED_PHASE1")]
    AnsweredPhase1,
    /// Phase 1 keyword search found nothing.
    #[serde(rename = "FAILED_PHASE1")]
    FailedPhase1,
    /// Phase 2 category browsing produced an answer.
    #[serde(rename = "ANSWERED_PHASE2")]
    AnsweredPhase2,
    /// Phase 2 category browsing found nothing.
    #[serde(rename = "FAILED_PHASE2")]
    FailedPhase2,
    /// Escalation recorded, fallback contact not yet attached.
    #[serde(rename = "NO_ANSWER")]
    NoAnswer,
    /// Escalation completed with a staff contact.
    #[serde(rename = "ESCALATED")]
    Escalated,
}

impl LogStatus {
    /// Stable string form used in the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnsweredPhase1 => "ANSWERED_PHASE1",
            Self::FailedPhase1 => "FAILED_PHASE1",
            Self::AnsweredPhase2 => "ANSWERED_PHASE2",
            Self::FailedPhase2 => "FAILED_PHASE2",
            Self::NoAnswer => "NO_ANSWER",
            Self::Escalated => "ESCALATED",
        }
    }

    /// Parse the stable string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ANSWERED_PHASE1" => Some(Self::AnsweredPhase1),
            "FAILED_PHASE1" => Some(Self::FailedPhase1),
            "ANSWERED_PHASE2" => Some(Self::AnsweredPhase2),
            "FAILED_PHASE2" => Some(Self::FailedPhase2),
            "NO_ANSWER" => Some(Self::NoAnswer),
            "ESCALATED" => Some(Self::Escalated),
            _ => None,
        }
    }

    /// Whether this status must carry a FAQ reference.
    #[must_use]
    pub const fn is_answered(self) -> bool {
        matches!(self, Self::AnsweredPhase1 | Self::AnsweredPhase2)
    }
}

/// A stored interaction log row.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Store-assigned identifier.
    pub log_id: LogId,
    /// The caller, when known.
    pub user_id: Option<UserId>,
    /// The category involved, when one was selected.
    pub category_id: Option<CategoryId>,
    /// The FAQ that answered the query; null for failed/escalated rows.
    pub faq_id: Option<FaqId>,
    /// The caller's query text.
    pub query: String,
    /// The response shown to the caller, when one was produced.
    pub response: Option<String>,
    /// Outcome of the attempt.
    pub status: LogStatus,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new log row.
#[derive(Debug, Clone)]
pub struct NewLog {
    /// The caller, when known.
    pub user_id: Option<UserId>,
    /// The category involved.
    pub category_id: Option<CategoryId>,
    /// The FAQ that answered the query.
    pub faq_id: Option<FaqId>,
    /// The caller's query text.
    pub query: String,
    /// The response shown to the caller.
    pub response: Option<String>,
    /// Outcome of the attempt.
    pub status: LogStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_string_roundtrip() {
        for status in [
            LogStatus::AnsweredPhase1,
            LogStatus::FailedPhase1,
            LogStatus::AnsweredPhase2,
            LogStatus::FailedPhase2,
            LogStatus::NoAnswer,
            LogStatus::Escalated,
        ] {
            assert_eq!(LogStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn status_serde_uses_store_literals() {
        let json = serde_json::to_string(&LogStatus::AnsweredPhase1).unwrap();
        assert_eq!(json, "\"ANSWERED_PHASE1\"");
        // The lowercase variants from parallel implementations are rejected.
        assert!(serde_json::from_str::<LogStatus>("\"Escalated\"").is_err());
    }

    #[test]
    fn answered_statuses_require_faq() {
        assert!(LogStatus::AnsweredPhase1.is_answered());
        assert!(LogStatus::AnsweredPhase2.is_answered());
        assert!(!LogStatus::NoAnswer.is_answered());
        assert!(!LogStatus::Escalated.is_answered());
    }
}
