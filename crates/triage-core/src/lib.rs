//! Core domain types for the helpdesk triage service.
//!
//! This crate defines the shared vocabulary of the triage flow: strongly
//! typed row identifiers, the FAQ/category/user/log records, the canonical
//! set of interaction-log statuses, and the relevance scorer used for
//! keyword matching.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod ids;
pub mod log;
pub mod relevance;
pub mod user;

pub use catalog::{Category, Faq, FaqHit, FaqSummary, NewFaq};
pub use ids::{CategoryId, FaqId, FormId, IdError, LogId, UserId};
pub use log::{LogEntry, LogStatus, NewLog};
pub use user::{FallbackContact, NewUser, User, UserRole};
