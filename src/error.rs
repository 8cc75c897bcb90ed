// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Application error types with consistent API responses.
//!
//! Every operation returns the same envelope: `{"success": true, ...}` on
//! success and `{"success": false, "error": "..."}` on failure. Upstream
//! detail (store or identity-provider failures) is logged server-side and
//! never leaks to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Message shown whenever the real cause stays server-side.
const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired session")]
    InvalidToken,

    #[error("Permission denied: administrator access required")]
    PermissionDenied,

    #[error("Administrators cannot change their own role")]
    SelfRoleChange,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Email already in use")]
    EmailInUse,

    #[error("Password is too weak")]
    WeakPassword,

    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON failure envelope.
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Unauthorized | AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            AppError::PermissionDenied => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::SelfRoleChange | AppError::Validation(_) | AppError::WeakPassword => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::EmailInUse => (StatusCode::CONFLICT, self.to_string()),
            AppError::Identity(msg) => {
                tracing::error!(error = %msg, "Identity provider error");
                (StatusCode::BAD_GATEWAY, GENERIC_ERROR.to_string())
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR.to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR.to_string())
            }
        };

        let body = ErrorResponse {
            success: false,
            error,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
