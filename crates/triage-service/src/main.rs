//! Helpdesk Triage Service - HTTP API for the three-phase chatbot flow.
//!
//! This is the main entry point for the triage service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_service::{create_router, AppState, ServiceConfig};
use triage_store::PgStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,triage=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Helpdesk Triage Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        db_max_connections = config.db_max_connections,
        "Service configuration loaded"
    );

    // Connect the bounded PostgreSQL pool and apply migrations
    let store = PgStore::connect(&config.database_url, config.db_max_connections).await?;
    store.migrate().await?;
    tracing::info!("Database connected and migrated");

    // Build app state
    let state = AppState::new(Arc::new(store), config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
