// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! API routes for signed-in users.

use crate::error::{AppError, Result};
use crate::middleware::SessionUser;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Session routes (require a valid provider token).
/// The session middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/me", get(get_me))
}

/// Current user profile response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub success: bool,
    pub firebase_uid: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub role: String,
    pub email_verified: bool,
}

/// Get the signed-in user's profile.
///
/// The provider is the source of truth for email verification; when it
/// reports the address verified and the stored profile still says false,
/// the flag is synced here so the dashboard sees it on the next fetch.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<ProfileResponse>> {
    let mut user = state
        .db
        .get_user_by_uid(&session.uid)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    if session.email_verified && !user.email_verified {
        user.email_verified = true;
        if let Some(id) = user.id.clone() {
            state.db.update_user(&id, &user).await?;
            tracing::debug!(uid = %session.uid, "Synced email verification from provider");
        }
    }

    Ok(Json(ProfileResponse {
        success: true,
        firebase_uid: user.firebase_uid,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        display_name: user.display_name,
        role: user.role.as_str().to_string(),
        email_verified: user.email_verified,
    }))
}
