// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Identity Toolkit API client for account management.
//!
//! Handles:
//! - Account creation (email/password signup)
//! - Verification email dispatch
//! - Session (ID token) lookup
//! - Administrative account deletion (center rejection)
//!
//! The provider owns credentials, password policy, and email delivery; this
//! client only translates its REST surface into typed calls and errors.

use crate::config::Config;
use crate::error::AppError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const PROD_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// How admin calls (account deletion) authenticate.
#[derive(Clone)]
enum AdminAuth {
    /// Emulator accepts a fixed owner bearer, no real credential involved.
    Emulator,
    /// OAuth bearer minted from service-account or ambient credentials.
    Token(Arc<gcloud_sdk::GoogleAuthTokenGenerator>),
}

/// Low-level Identity Toolkit REST client.
#[derive(Clone)]
struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    project_id: String,
    frontend_url: String,
    admin_auth: AdminAuth,
}

/// Identity provider service.
///
/// Constructed once at startup and injected through `AppState`; the admin
/// token generator lives inside it, so there is no process-global client.
#[derive(Clone)]
pub struct IdentityService {
    client: Option<IdentityClient>,
    /// Set only by [`Self::new_recording`]; counts `delete_account` calls.
    deletion_attempts: Option<Arc<AtomicUsize>>,
}

impl IdentityService {
    /// Create a new identity service.
    ///
    /// For local development with the Auth emulator, set
    /// FIREBASE_AUTH_EMULATOR_HOST; admin calls then use the emulator's
    /// owner bearer instead of real credentials.
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let (base_url, admin_auth) = match std::env::var("FIREBASE_AUTH_EMULATOR_HOST") {
            Ok(host) => {
                tracing::info!(host = %host, "Using Identity Toolkit emulator");
                (
                    format!("http://{}/identitytoolkit.googleapis.com/v1", host),
                    AdminAuth::Emulator,
                )
            }
            Err(_) => {
                let source = match &config.service_account_key {
                    Some(blob) => gcloud_sdk::TokenSourceType::Json(decode_credentials(blob)?),
                    None => gcloud_sdk::TokenSourceType::Default,
                };

                let generator = gcloud_sdk::GoogleAuthTokenGenerator::new(
                    source,
                    gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
                )
                .await
                .map_err(|e| {
                    AppError::Identity(format!("Failed to initialize admin credentials: {}", e))
                })?;

                (
                    PROD_BASE_URL.to_string(),
                    AdminAuth::Token(Arc::new(generator)),
                )
            }
        };

        Ok(Self {
            client: Some(IdentityClient {
                http: reqwest::Client::new(),
                base_url,
                api_key: config.identity_api_key.clone(),
                project_id: config.gcp_project_id.clone(),
                frontend_url: config.frontend_url.clone(),
                admin_auth,
            }),
            deletion_attempts: None,
        })
    }

    /// Create a mock identity service for testing (offline mode).
    ///
    /// All provider operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            client: None,
            deletion_attempts: None,
        }
    }

    /// Offline mock that also counts `delete_account` calls.
    ///
    /// Workflow tests assert on the counter to tell "never attempted a
    /// provider deletion" apart from "attempted one and it failed"; the
    /// calls themselves still error like [`Self::new_mock`].
    pub fn new_recording() -> (Self, Arc<AtomicUsize>) {
        let attempts = Arc::new(AtomicUsize::new(0));
        (
            Self {
                client: None,
                deletion_attempts: Some(attempts.clone()),
            },
            attempts,
        )
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&IdentityClient, AppError> {
        self.client.as_ref().ok_or_else(|| {
            AppError::Identity("Identity provider not configured (offline mode)".to_string())
        })
    }

    /// Create a provider account with email and password.
    ///
    /// The provider enforces email uniqueness and password strength;
    /// those two rejections map to user-facing errors, everything else
    /// stays generic.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderAccount, AppError> {
        let client = self.get_client()?;
        let url = format!("{}/accounts:signUp?key={}", client.base_url, client.api_key);

        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response = client
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("Signup request failed: {}", e)))?;

        client.check_response_json(response).await
    }

    /// Request a verification email for a freshly signed-up account.
    ///
    /// The continue link sends the user back to the login page with the
    /// email prefilled once they have clicked through.
    pub async fn send_verification_email(
        &self,
        id_token: &str,
        email: &str,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        let url = format!(
            "{}/accounts:sendOobCode?key={}",
            client.base_url, client.api_key
        );

        let continue_url = format!(
            "{}/login?email={}",
            client.frontend_url.trim_end_matches('/'),
            urlencoding::encode(email)
        );

        let body = serde_json::json!({
            "requestType": "VERIFY_EMAIL",
            "idToken": id_token,
            "continueUrl": continue_url,
            "canHandleCodeInApp": true,
        });

        let response = client
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("Verification email request failed: {}", e)))?;

        client.check_response(response).await
    }

    /// Resolve a session ID token to its provider account.
    pub async fn lookup(&self, id_token: &str) -> Result<ProviderUser, AppError> {
        let client = self.get_client()?;
        let url = format!("{}/accounts:lookup?key={}", client.base_url, client.api_key);

        let body = serde_json::json!({ "idToken": id_token });

        let response = client
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("Session lookup failed: {}", e)))?;

        let lookup: LookupResponse = client.check_response_json(response).await?;

        lookup
            .users
            .into_iter()
            .next()
            .ok_or(AppError::InvalidToken)
    }

    /// Delete a provider account by uid (admin operation).
    ///
    /// Callers treat this as best-effort; the one caller (center rejection)
    /// logs a failure and proceeds with the record deletion regardless.
    pub async fn delete_account(&self, uid: &str) -> Result<(), AppError> {
        if let Some(attempts) = &self.deletion_attempts {
            attempts.fetch_add(1, Ordering::SeqCst);
        }

        let client = self.get_client()?;
        let url = format!(
            "{}/projects/{}/accounts:delete",
            client.base_url, client.project_id
        );

        let body = serde_json::json!({ "localId": uid });

        let response = client
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, client.admin_bearer().await?)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("Account deletion request failed: {}", e)))?;

        client.check_response(response).await?;
        tracing::info!(uid, "Provider account deleted");
        Ok(())
    }
}

impl IdentityClient {
    /// Authorization header value for admin endpoints.
    async fn admin_bearer(&self) -> Result<String, AppError> {
        match &self.admin_auth {
            AdminAuth::Emulator => Ok("Bearer owner".to_string()),
            AdminAuth::Token(generator) => {
                let token = generator.create_token().await.map_err(|e| {
                    AppError::Identity(format!("Failed to mint admin token: {}", e))
                })?;
                Ok(token.header_value())
            }
        }
    }

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<(), AppError> {
        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(map_provider_error(status.as_u16(), &body))
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(map_provider_error(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Identity(format!("JSON parse error: {}", e)))
    }
}

/// Map a provider error body to an application error.
///
/// The provider wraps failures as `{"error": {"message": "CODE"}}` where
/// some codes carry detail after a colon ("WEAK_PASSWORD : Password should
/// be at least 6 characters"). Only email-exists and weak-password surface
/// to users; token problems become auth failures; the rest stays generic.
fn map_provider_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_default();

    if message == "EMAIL_EXISTS" {
        return AppError::EmailInUse;
    }
    if message.starts_with("WEAK_PASSWORD") {
        return AppError::WeakPassword;
    }
    if matches!(
        message.as_str(),
        "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" | "USER_DISABLED" | "USER_NOT_FOUND"
    ) {
        return AppError::InvalidToken;
    }

    AppError::Identity(format!(
        "HTTP {}: {}",
        status,
        if message.is_empty() {
            body
        } else {
            message.as_str()
        }
    ))
}

/// Decode the configured service-account key, which may be raw JSON or
/// base64-encoded JSON (the usual shape when injected via env bindings).
fn decode_credentials(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    let bytes = BASE64.decode(trimmed).map_err(|e| {
        AppError::Identity(format!("Service account key is neither JSON nor base64: {}", e))
    })?;

    String::from_utf8(bytes)
        .map_err(|e| AppError::Identity(format!("Service account key is not valid UTF-8: {}", e)))
}

/// Provider account returned by signup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAccount {
    pub local_id: String,
    pub id_token: String,
    pub email: String,
}

/// Provider account returned by session lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderUser {
    pub local_id: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
}

/// Response wrapper for accounts:lookup.
#[derive(Debug, Clone, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<ProviderUser>,
}
