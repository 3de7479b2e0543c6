// SPDX-License-Identifier: MIT

//! Admin routes: user management and deterministic-score test settings.
//!
//! All routes here sit behind the auth and admin middleware applied in
//! routes/mod.rs.

use crate::error::{AppError, Result};
use crate::routes::vibe::{UserResponse, VibeResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/{id}", delete(delete_user))
        .route("/api/admin/users/{id}/role", put(set_role))
        .route("/api/admin/users/{id}/locked-score", put(set_locked_score))
        .route("/api/admin/users/{id}/vibes", get(get_user_vibes))
        .route(
            "/api/admin/users/{id}/vibes/today",
            delete(reset_today_vibe),
        )
        .route("/api/admin/vibes/{id}", delete(delete_vibe))
}

// ─── Users ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

/// List all users.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<UsersResponse>> {
    let users = state.db.list_users().await?;
    Ok(Json(UsersResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

#[derive(Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

/// Delete a user and all their vibes.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ActionResponse>> {
    if state.db.get_user(&user_id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {} not found", user_id)));
    }

    let removed = state.db.delete_user_vibes(&user_id).await?;
    state.db.delete_user(&user_id).await?;

    tracing::info!(user_id = %user_id, vibes_removed = removed, "Admin deleted user");

    Ok(Json(ActionResponse {
        success: true,
        message: format!("User deleted along with {} vibes", removed),
    }))
}

#[derive(Deserialize)]
pub struct SetRoleRequest {
    pub is_admin: bool,
}

/// Toggle a user's admin flag.
async fn set_role(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(payload): Json<SetRoleRequest>,
) -> Result<Json<UserResponse>> {
    let user = state.db.set_admin_flag(&user_id, payload.is_admin).await?;
    tracing::info!(user_id = %user_id, is_admin = payload.is_admin, "Admin changed role");
    Ok(Json(user.into()))
}

// ─── Locked Score ────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct SetLockedScoreRequest {
    /// Score override in 0..=100, or null to clear it.
    #[validate(range(max = 100, message = "score must be between 0 and 100"))]
    pub score: Option<u8>,
}

/// Set or clear a user's locked score, used for deterministic testing of
/// score-dependent effects.
async fn set_locked_score(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(payload): Json<SetLockedScoreRequest>,
) -> Result<Json<UserResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state.db.set_locked_score(&user_id, payload.score).await?;
    tracing::info!(user_id = %user_id, score = ?payload.score, "Admin set locked score");
    Ok(Json(user.into()))
}

// ─── Vibes ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserVibesResponse {
    pub vibes: Vec<VibeResponse>,
}

/// Full vibe history for one user.
async fn get_user_vibes(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserVibesResponse>> {
    let vibes = state.db.get_user_vibes(&user_id).await?;
    Ok(Json(UserVibesResponse {
        vibes: vibes.into_iter().map(VibeResponse::from).collect(),
    }))
}

/// Delete a single vibe record.
async fn delete_vibe(
    State(state): State<Arc<AppState>>,
    Path(vibe_id): Path<String>,
) -> Result<Json<ActionResponse>> {
    state.db.delete_vibe(&vibe_id).await?;
    tracing::info!(vibe_id = %vibe_id, "Admin deleted vibe");
    Ok(Json(ActionResponse {
        success: true,
        message: "Vibe deleted".to_string(),
    }))
}

/// Delete a user's vibe for today so they can play again.
async fn reset_today_vibe(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ActionResponse>> {
    let removed = state.db.delete_today_vibe(&user_id).await?;
    tracing::info!(user_id = %user_id, removed, "Admin reset today's vibe");
    Ok(Json(ActionResponse {
        success: true,
        message: if removed > 0 {
            "Today's vibe reset; the user can play again".to_string()
        } else {
            "No vibe found for today".to_string()
        },
    }))
}
