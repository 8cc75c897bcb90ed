// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Public registration routes for citizens and centers.

use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::AppState;
use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Registration routes (no session required).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register_citizen))
        .route("/register/center", post(register_center))
        .route("/register/center/complete", post(complete_center_signup))
}

// ─── Citizen Registration ────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCitizenRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "firstName must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "lastName must not be empty"))]
    pub last_name: String,
}

/// Response for a completed citizen registration.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegisterCitizenResponse {
    pub success: bool,
    pub user_id: Option<String>,
}

/// Register a citizen account.
async fn register_citizen(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterCitizenRequest>,
) -> Result<Json<RegisterCitizenResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state
        .registration
        .register_citizen(&req.email, &req.password, &req.first_name, &req.last_name)
        .await?;

    Ok(Json(RegisterCitizenResponse {
        success: true,
        user_id: user.id,
    }))
}

// ─── Center Registration ─────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCenterRequest {
    #[validate(length(min = 1, message = "centerName must not be empty"))]
    pub center_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "district must not be empty"))]
    pub district: String,
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: String,
}

/// Response for a received center registration.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegisterCenterResponse {
    pub success: bool,
    pub center_id: Option<String>,
}

/// Register a center; the record stays pending until an administrator
/// approves it.
async fn register_center(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterCenterRequest>,
) -> Result<Json<RegisterCenterResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let center = state
        .registration
        .register_center(&req.center_name, &req.email, &req.district, &req.address)
        .await?;

    Ok(Json(RegisterCenterResponse {
        success: true,
        center_id: center.id,
    }))
}

// ─── Center Signup Completion ────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteCenterSignupRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

/// Response once a center has created its credentials.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CompleteCenterSignupResponse {
    pub success: bool,
    pub uid: Option<String>,
}

/// Create provider credentials for a registered center.
async fn complete_center_signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompleteCenterSignupRequest>,
) -> Result<Json<CompleteCenterSignupResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let center = state
        .registration
        .complete_center_signup(&req.email, &req.password)
        .await?;

    Ok(Json(CompleteCenterSignupResponse {
        success: true,
        uid: center.uid,
    }))
}
