//! Category read handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use triage_core::Category;

use crate::error::ApiError;
use crate::state::AppState;

/// Category list response.
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    /// All categories in store order.
    pub categories: Vec<Category>,
}

/// List all categories.
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.store.list_categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}
