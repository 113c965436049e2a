//! Authentication route handlers for admin.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::services::auth;
use crate::state::AppState;

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login result.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
}

/// Check credentials and start an admin session.
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    // Argon2 verification is CPU-bound
    let admin = tokio::task::spawn_blocking(move || {
        auth::authenticate(state.config(), &req.username, &req.password)
    })
    .await
    .map_err(|e| AppError::Internal(format!("login task failed: {e}")))??;

    set_current_admin(&session, &admin).await?;
    tracing::info!(username = %admin.username, "admin logged in");

    Ok(Json(LoginResponse {
        username: admin.username,
    }))
}

/// Logout and clear session.
///
/// POST /auth/logout
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_admin(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}
