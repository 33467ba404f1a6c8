//! Chatbot-side user registration.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use triage_core::{NewUser, User};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Caller display name.
    pub full_name: Option<String>,
    /// Caller email.
    pub user_email: Option<String>,
    /// Caller phone.
    pub user_phone: Option<String>,
    /// Caller classification.
    pub user_type: Option<String>,
}

/// Registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// What happened.
    pub message: String,
    /// The registered (or pre-existing) user.
    pub user: User,
}

/// Register a chatbot caller before the triage session starts.
///
/// Re-registering a known email is not an error: the existing record is
/// returned so the caller can resume with their prior identity.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let (Some(full_name), Some(email)) = (body.full_name, body.user_email) else {
        return Err(ApiError::BadRequest(
            "fullName and userEmail are required".into(),
        ));
    };
    if full_name.trim().is_empty() || email.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "fullName and userEmail are required".into(),
        ));
    }

    if let Some(existing) = state.store.find_user_by_email(&email).await? {
        return Ok((
            StatusCode::OK,
            Json(RegisterResponse {
                message: "User already registered".into(),
                user: existing,
            }),
        ));
    }

    // A concurrent registration for the same email surfaces as a 409
    // through the store's unique constraint.
    let user = state
        .store
        .insert_user(&NewUser::caller(
            full_name,
            email,
            body.user_phone,
            body.user_type,
        ))
        .await?;

    tracing::info!(user_id = %user.user_id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".into(),
            user,
        }),
    ))
}
