// SPDX-License-Identifier: MIT

//! Vibe routes for authenticated users: profile, today's vibe, play, history.

use crate::error::{AppError, Result};
use crate::luck::{self, SpecialEffect, EFFECT_DURATION_SECS};
use crate::middleware::auth::AuthUser;
use crate::models::{DailyVibe, User};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

const DEFAULT_MOOD: &str = "feeling good today";

/// Vibe routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/vibe", post(create_vibe))
        .route("/api/vibe/today", get(get_today))
        .route("/api/vibe/history", get(get_history))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub is_admin: bool,
    pub locked_score: Option<u8>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            is_admin: user.is_admin,
            locked_score: user.locked_score,
        }
    }
}

/// Load the caller's stored profile, creating it on first login and
/// refreshing email/name when the auth provider reports new values.
async fn load_or_create_user(state: &AppState, auth: &AuthUser) -> Result<User> {
    if let Some(mut user) = state.db.get_user(&auth.user_id).await? {
        if user.email != auth.email || user.username != auth.username {
            user.email = auth.email.clone();
            user.username = auth.username.clone();
            user.updated_at = format_utc_rfc3339(chrono::Utc::now());
            state.db.upsert_user(&user).await?;
        }
        return Ok(user);
    }

    let now = format_utc_rfc3339(chrono::Utc::now());
    let user = User {
        id: auth.user_id.clone(),
        email: auth.email.clone(),
        username: auth.username.clone(),
        is_admin: false,
        locked_score: None,
        created_at: now.clone(),
        updated_at: now,
    };
    state.db.upsert_user(&user).await?;
    tracing::info!(user_id = %user.id, "Created user on first login");
    Ok(user)
}

/// Get (or create) the current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let user = load_or_create_user(&state, &auth).await?;
    Ok(Json(user.into()))
}

// ─── Vibe Responses ──────────────────────────────────────────

/// Special effect descriptor sent to the frontend.
#[derive(Serialize)]
pub struct EffectInfo {
    pub name: SpecialEffect,
    /// Auto-dismiss window in seconds
    pub duration_secs: u64,
}

/// A vibe record plus presentation fields derived from it.
#[derive(Serialize)]
pub struct VibeResponse {
    pub id: String,
    pub created_at: String,
    pub luck_score: u8,
    pub fortune_text: String,
    pub colors: Vec<String>,
    pub song: String,
    pub luck_label: &'static str,
    pub gradient: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_effect: Option<EffectInfo>,
}

impl From<DailyVibe> for VibeResponse {
    fn from(vibe: DailyVibe) -> Self {
        let luck_label = luck::luck_label(vibe.luck_score);
        let gradient = luck::gradient(&vibe.colors);
        let special_effect = luck::special_effect(vibe.luck_score).map(|name| EffectInfo {
            name,
            duration_secs: EFFECT_DURATION_SECS,
        });

        Self {
            id: vibe.id,
            created_at: vibe.created_at,
            luck_score: vibe.luck_score,
            fortune_text: vibe.fortune_text,
            colors: vibe.colors,
            song: vibe.song,
            luck_label,
            gradient,
            special_effect,
        }
    }
}

// ─── Today ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TodayResponse {
    pub vibe: Option<VibeResponse>,
    pub has_played_today: bool,
}

/// Get today's vibe for the current user, if one exists.
async fn get_today(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<TodayResponse>> {
    let vibe = state.db.get_today_vibe(&auth.user_id).await?;
    Ok(Json(TodayResponse {
        has_played_today: vibe.is_some(),
        vibe: vibe.map(VibeResponse::from),
    }))
}

// ─── Play ────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct CreateVibeRequest {
    /// Free-form mood description; defaulted when absent or blank.
    #[validate(length(max = 500, message = "mood is too long"))]
    pub mood: Option<String>,
}

/// Generate and persist today's vibe for the current user.
///
/// Entitlement is checked against a today-read taken immediately before
/// the insert to keep the duplicate window small (best-effort, per the
/// single-writer-per-user workload).
async fn create_vibe(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateVibeRequest>,
) -> Result<Json<VibeResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mood = payload
        .mood
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_MOOD);

    let user = load_or_create_user(&state, &auth).await?;

    let existing = state.db.get_today_vibe(&user.id).await?;
    if let crate::services::Entitlement::Deny { reason } =
        crate::services::check_entitlement(user.is_admin, existing.is_some())
    {
        tracing::debug!(user_id = %user.id, reason, "Vibe creation denied");
        return Err(AppError::AlreadyPlayed);
    }

    let result = state
        .vibe_engine
        .generate(mood, user.locked_score)
        .await?;

    let vibe = DailyVibe {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.id.clone(),
        created_at: format_utc_rfc3339(chrono::Utc::now()),
        luck_score: result.luck_score,
        fortune_text: result.fortune_text,
        colors: result.colors,
        song: result.song,
    };
    state.db.insert_vibe(&vibe).await?;

    tracing::info!(
        user_id = %user.id,
        luck_score = vibe.luck_score,
        "Created daily vibe"
    );

    Ok(Json(vibe.into()))
}

// ─── History ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HistoryResponse {
    pub vibes: Vec<VibeResponse>,
}

/// Get the current user's vibes for the last 7 days, newest first.
async fn get_history(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<HistoryResponse>> {
    let vibes = state.db.get_history(&auth.user_id).await?;
    Ok(Json(HistoryResponse {
        vibes: vibes.into_iter().map(VibeResponse::from).collect(),
    }))
}
