//! Interaction log read handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use triage_core::LogEntry;

use crate::error::ApiError;
use crate::state::AppState;

/// Default page size for log listing.
const DEFAULT_LIMIT: i64 = 50;

/// Hard cap on page size.
const MAX_LIMIT: i64 = 200;

/// Query parameters for `GET /logs`.
#[derive(Debug, Deserialize)]
pub struct LogsParams {
    /// Page size (default 50, max 200).
    pub limit: Option<i64>,
    /// Rows to skip.
    pub offset: Option<i64>,
}

/// Log listing response.
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    /// Log rows, newest first.
    pub logs: Vec<LogEntry>,
}

/// List interaction logs for the admin dashboard, newest first.
pub async fn list_logs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LogsParams>,
) -> Result<Json<LogsResponse>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let logs = state.store.list_logs(limit, offset).await?;
    Ok(Json(LogsResponse { logs }))
}
