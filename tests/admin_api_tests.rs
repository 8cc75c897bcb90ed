// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Admin API tests against mock (offline) dependencies.
//!
//! These verify the HTTP surface: session gating, input validation, the
//! uniform response envelope, and that upstream failures never leak detail
//! to the caller. The workflow semantics themselves are covered by the
//! emulator-backed integration tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

/// Admin routes without the session layer, for exercising handler
/// validation directly. The mutation handlers take the acting uid from the
/// request body, so no session extension is required; the list handlers
/// read the session and are only exercised through the full app.
fn admin_router() -> axum::Router {
    let state = common::create_test_state();
    vaxreg::routes::admin::routes().with_state(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/admin/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn test_session_cookie_is_accepted_as_token_source() {
    let (app, _) = common::create_test_app();

    // A session cookie alone must reach the provider lookup: with the mock
    // identity service offline that lookup fails upstream (502), which is
    // distinct from the missing-token rejection (401).
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/admin/users")
                .header(
                    header::COOKIE,
                    format!("{}=some-session-token", vaxreg::middleware::session::SESSION_COOKIE),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_malformed_authorization_header_is_rejected() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/admin/users")
                .header(header::AUTHORIZATION, "Token some-session-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn test_session_check_failure_stays_generic() {
    let (app, _) = common::create_test_app();

    // A token is present but the mock identity service is offline, so the
    // lookup fails upstream. The caller must only see the generic message.
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/admin/users")
                .header(header::AUTHORIZATION, "Bearer some-session-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Something went wrong. Please try again.");
}

#[tokio::test]
async fn test_update_role_rejects_empty_target() {
    let app = admin_router();

    let payload = json!({
        "targetUserId": "",
        "newRole": "authority",
        "adminFirebaseUid": "admin-uid"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/users/role")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(
        body["error"].as_str().unwrap().starts_with("Invalid input"),
        "validation failures should read as invalid input, got {}",
        body["error"]
    );
}

#[tokio::test]
async fn test_update_role_missing_fields_render_the_envelope() {
    let app = admin_router();

    // Well-formed JSON with every field absent. The deserializer rejection
    // must come back as the `{success, error}` envelope, not as the
    // extractor's plain-text message.
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/users/role")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/json"));

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(
        body["error"].as_str().unwrap().starts_with("Invalid input"),
        "body rejections should read as invalid input, got {}",
        body["error"]
    );
}

#[tokio::test]
async fn test_update_role_malformed_body_renders_the_envelope() {
    let app = admin_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/users/role")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("not json at all"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn test_update_role_rejects_unknown_role() {
    let app = admin_router();

    let payload = json!({
        "targetUserId": "user-1",
        "newRole": "admin",
        "adminFirebaseUid": "admin-uid"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/users/role")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("unknown role"));
}

#[tokio::test]
async fn test_update_role_offline_db_stays_generic() {
    let app = admin_router();

    // Valid shape; the authority check then hits the offline database.
    // The caller sees a structured failure, never a raw fault.
    let payload = json!({
        "targetUserId": "user-1",
        "newRole": "authority",
        "adminFirebaseUid": "admin-uid"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/users/role")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Something went wrong. Please try again.");
}

#[tokio::test]
async fn test_verify_center_rejects_empty_center_id() {
    let app = admin_router();

    let payload = json!({
        "centerId": "",
        "adminFirebaseUid": "admin-uid"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/centers/verify")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn test_reject_center_rejects_empty_admin_uid() {
    let app = admin_router();

    let payload = json!({
        "centerId": "center-1",
        "adminFirebaseUid": ""
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/centers/reject")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "vaxreg");
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/admin/users")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // OPTIONS should return 200 (CORS preflight success)
    assert_eq!(response.status(), StatusCode::OK);

    // Should have CORS headers
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_cors_rejects_lookalike_local_origins() {
    let (app, _) = common::create_test_app();

    // Credentialed CORS: a host that merely starts with "localhost" must
    // not be granted an allow-origin header.
    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/admin/users")
                .header(header::ORIGIN, "http://localhost.evil.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_responses_carry_no_store_cache_control() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("Cache-Control").unwrap(), "no-store");
}
