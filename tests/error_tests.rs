// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Error-to-response mapping tests: status codes and the uniform
//! `{"success": false, "error": ...}` envelope.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;
use vaxreg::error::AppError;

async fn render(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_permission_denied_is_forbidden_with_specific_message() {
    let (status, body) = render(AppError::PermissionDenied).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Permission denied: administrator access required"
    );
}

#[tokio::test]
async fn test_self_role_change_is_bad_request() {
    let (status, body) = render(AppError::SelfRoleChange).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Administrators cannot change their own role");
}

#[tokio::test]
async fn test_not_found_names_the_entity() {
    let (status, body) = render(AppError::NotFound("Center".to_string())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Center not found");
}

#[tokio::test]
async fn test_validation_is_bad_request() {
    let (status, body) = render(AppError::Validation("email: invalid".to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input: email: invalid");
}

#[tokio::test]
async fn test_email_in_use_is_conflict() {
    let (status, body) = render(AppError::EmailInUse).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already in use");
}

#[tokio::test]
async fn test_weak_password_is_bad_request() {
    let (status, body) = render(AppError::WeakPassword).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password is too weak");
}

#[tokio::test]
async fn test_unauthorized_and_invalid_token_are_401() {
    let (status, _) = render(AppError::Unauthorized).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = render(AppError::InvalidToken).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired session");
}

#[tokio::test]
async fn test_database_detail_never_reaches_the_caller() {
    let (status, body) = render(AppError::Database(
        "connection refused at 10.0.0.7:443".to_string(),
    ))
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Something went wrong. Please try again.");
    assert!(!body["error"].as_str().unwrap().contains("10.0.0.7"));
}

#[tokio::test]
async fn test_identity_detail_never_reaches_the_caller() {
    let (status, body) = render(AppError::Identity(
        "HTTP 500: INTERNAL_ERROR at provider".to_string(),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Something went wrong. Please try again.");
}

#[tokio::test]
async fn test_internal_errors_stay_generic() {
    let (status, body) = render(AppError::Internal(anyhow::anyhow!("boom"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Something went wrong. Please try again.");
}
