// SPDX-License-Identifier: MIT

//! Admin gating middleware.
//!
//! Runs after [`super::auth::require_auth`]: loads the caller's stored
//! profile and rejects anyone without the admin flag.

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires the authenticated user to be an admin.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or(AppError::Unauthorized)?;

    let user = state
        .db
        .get_user(&auth_user.user_id)
        .await?
        .ok_or(AppError::Forbidden)?;

    if !user.is_admin {
        tracing::warn!(user_id = %auth_user.user_id, "Non-admin hit admin endpoint");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
