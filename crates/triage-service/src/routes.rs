//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{categories, health, logs, triage, users};
use crate::state::AppState;

// ============================================================================
// Concurrency Limiting Constants
// ============================================================================

/// Maximum concurrent requests for the chatbot triage endpoints.
const TRIAGE_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Maximum concurrent requests for the dashboard read endpoints.
const ADMIN_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Triage (chatbot, concurrency-limited)
/// - `POST /register` - Register a caller before the session
/// - `GET /search?query=&userId=` - Phase 1 keyword search
/// - `GET /suggest?query=` - Phase 2 category suggestions
/// - `GET /categories/{id}/faqs?query=&userId=` - Phase 2 category browsing
/// - `POST /query` - Phase 3 staff escalation
///
/// ## Dashboard reads (concurrency-limited)
/// - `GET /categories` - Full category list
/// - `GET /logs?limit=&offset=` - Interaction logs, newest first
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Chatbot traffic is bursty: many concurrent sessions, each issuing one
    // small request per phase. Bound it without serializing sessions.
    let triage_routes = Router::new()
        .route("/register", post(users::register))
        .route("/search", get(triage::search))
        .route("/suggest", get(triage::suggest))
        .route("/categories/:id/faqs", get(triage::browse_category))
        .route("/query", post(triage::escalate))
        .layer(ConcurrencyLimitLayer::new(TRIAGE_MAX_CONCURRENT_REQUESTS));

    let admin_routes = Router::new()
        .route("/categories", get(categories::list_categories))
        .route("/logs", get(logs::list_logs))
        .layer(ConcurrencyLimitLayer::new(ADMIN_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no limit)
        .route("/health", get(health::health))
        .merge(triage_routes)
        .merge(admin_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
