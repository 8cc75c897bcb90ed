// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Administrative dashboard routes.
//!
//! The session middleware establishes who is calling; every handler here
//! additionally passes an acting uid into the workflow, which re-checks the
//! stored role before touching anything. Mutations take that uid from the
//! request body, lists from the session itself. Everything returns the
//! uniform `{success, ...}` envelope the dashboard renders from.

use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::middleware::SessionUser;
use crate::models::{Center, Role, User};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Admin routes (require a session; role is enforced per call).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/users", get(get_users))
        .route("/api/admin/centers", get(get_centers))
        .route("/api/admin/users/role", post(update_user_role))
        .route("/api/admin/centers/verify", post(verify_center))
        .route("/api/admin/centers/reject", post(reject_center))
}

/// Envelope for mutations that carry no payload.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MutationResponse {
    pub success: bool,
}

// ─── Dashboard Lists ─────────────────────────────────────────

/// User row as the dashboard renders it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserSummary {
    pub id: String,
    pub firebase_uid: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub email_verified: bool,
    pub created_at: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            firebase_uid: user.firebase_uid,
            email: user.email,
            display_name: user.display_name,
            role: user.role.as_str().to_string(),
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<UserSummary>,
}

/// List all users for the dashboard. Authority only.
async fn get_users(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<UsersResponse>> {
    let users = state.admin.list_users(&session.uid).await?;

    Ok(Json(UsersResponse {
        success: true,
        users: users.into_iter().map(UserSummary::from).collect(),
    }))
}

/// Center row as the dashboard renders it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CenterSummary {
    pub id: String,
    pub uid: Option<String>,
    pub center_name: String,
    pub email: String,
    pub district: String,
    pub address: String,
    pub verified: bool,
    pub created_at: String,
}

impl From<Center> for CenterSummary {
    fn from(center: Center) -> Self {
        Self {
            id: center.id.unwrap_or_default(),
            uid: center.uid,
            center_name: center.center_name,
            email: center.email,
            district: center.location.district,
            address: center.location.address,
            verified: center.verified,
            created_at: center.created_at,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CentersResponse {
    pub success: bool,
    pub centers: Vec<CenterSummary>,
}

/// List all centers for the dashboard. Authority only.
async fn get_centers(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<CentersResponse>> {
    let centers = state.admin.list_centers(&session.uid).await?;

    Ok(Json(CentersResponse {
        success: true,
        centers: centers.into_iter().map(CenterSummary::from).collect(),
    }))
}

// ─── Role Assignment ─────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleRequest {
    #[validate(length(min = 1, message = "targetUserId must not be empty"))]
    pub target_user_id: String,
    #[validate(length(min = 1, message = "newRole must not be empty"))]
    pub new_role: String,
    #[validate(length(min = 1, message = "adminFirebaseUid must not be empty"))]
    pub admin_firebase_uid: String,
}

/// Change a user's role.
async fn update_user_role(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateUserRoleRequest>,
) -> Result<Json<MutationResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let role = Role::parse(&req.new_role)
        .ok_or_else(|| AppError::Validation(format!("unknown role '{}'", req.new_role)))?;

    state
        .admin
        .assign_role(&req.target_user_id, role, &req.admin_firebase_uid)
        .await?;

    Ok(Json(MutationResponse { success: true }))
}

// ─── Center Verification ─────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CenterActionRequest {
    #[validate(length(min = 1, message = "centerId must not be empty"))]
    pub center_id: String,
    #[validate(length(min = 1, message = "adminFirebaseUid must not be empty"))]
    pub admin_firebase_uid: String,
}

/// Approve a center (sets `verified = true`; idempotent).
async fn verify_center(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CenterActionRequest>,
) -> Result<Json<MutationResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state
        .admin
        .approve_center(&req.center_id, &req.admin_firebase_uid)
        .await?;

    Ok(Json(MutationResponse { success: true }))
}

/// Reject a center (deletes the record; provider cleanup is best-effort).
async fn reject_center(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CenterActionRequest>,
) -> Result<Json<MutationResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state
        .admin
        .reject_center(&req.center_id, &req.admin_firebase_uid)
        .await?;

    Ok(Json(MutationResponse { success: true }))
}
