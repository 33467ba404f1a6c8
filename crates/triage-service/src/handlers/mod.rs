//! HTTP request handlers.

pub mod categories;
pub mod health;
pub mod logs;
pub mod triage;
pub mod users;
