//! HTTP API service for helpdesk triage.
//!
//! Exposes the three-phase chatbot triage flow (keyword search, category
//! browsing, staff escalation) plus caller registration and dashboard read
//! endpoints, over an injected [`triage_store::Store`] backend.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
