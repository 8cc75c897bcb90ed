// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Session middleware backed by identity-provider token lookup.
//!
//! Sessions are provider ID tokens, verified by asking the provider rather
//! than by checking a signature locally. The middleware only establishes
//! who is calling; whether they may perform an administrative operation is
//! re-checked against the stored role inside the workflow itself.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Session cookie name set by the frontend after provider sign-in.
pub const SESSION_COOKIE: &str = "vaxreg_session";

/// Authenticated session extracted from the provider token.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// Identity-provider uid
    pub uid: String,
    /// Account email
    pub email: String,
    /// Whether the provider has confirmed the email
    pub email_verified: bool,
}

/// Middleware that requires a valid provider session token.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header {
            Some(h) if h.starts_with("Bearer ") => h[7..].to_string(),
            _ => return Err(AppError::Unauthorized),
        }
    };

    let provider_user = state.identity.lookup(&token).await?;

    let session_user = SessionUser {
        uid: provider_user.local_id,
        email: provider_user.email,
        email_verified: provider_user.email_verified,
    };
    request.extensions_mut().insert(session_user);

    Ok(next.run(request).await)
}
