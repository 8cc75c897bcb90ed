// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (citizen/authority/center profiles)
//! - Centers (vaccination center registrations)
//!
//! Document IDs are store-assigned; they surface on the models through the
//! `_firestore_id` alias and are never written back into the document body.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Center, User};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with the emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator takes an unauthenticated connection; skipping real
        // credential resolution keeps local runs free of credential warnings.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore emulator");

        // ExternalJwtFunctionSource supplies the throwaway token the
        // emulator ignores, with no custom TokenSource impl needed.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore emulator: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore (emulator)");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Create a user profile with a store-assigned document ID.
    ///
    /// Returns the stored record with `id` populated.
    pub async fn create_user(&self, user: &User) -> Result<User, AppError> {
        self.get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .generate_document_id()
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user by document ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user by their identity-provider uid.
    ///
    /// There is at most one profile per uid.
    pub async fn get_user_by_uid(&self, firebase_uid: &str) -> Result<Option<User>, AppError> {
        let uid = firebase_uid.to_string();
        let mut users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.field("firebaseUid").eq(uid.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.pop())
    }

    /// List all users, newest first.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Overwrite a user document.
    pub async fn update_user(&self, user_id: &str, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(user_id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Center Operations ───────────────────────────────────────

    /// Create a center record with a store-assigned document ID.
    ///
    /// Returns the stored record with `id` populated.
    pub async fn create_center(&self, center: &Center) -> Result<Center, AppError> {
        self.get_client()?
            .fluent()
            .insert()
            .into(collections::CENTERS)
            .generate_document_id()
            .object(center)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a center by document ID.
    pub async fn get_center(&self, center_id: &str) -> Result<Option<Center>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::CENTERS)
            .obj()
            .one(center_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a center by contact email.
    pub async fn get_center_by_email(&self, email: &str) -> Result<Option<Center>, AppError> {
        let email = email.to_string();
        let mut centers: Vec<Center> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::CENTERS)
            .filter(move |q| q.field("email").eq(email.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(centers.pop())
    }

    /// List all centers, newest first.
    pub async fn list_centers(&self) -> Result<Vec<Center>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::CENTERS)
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Overwrite a center document.
    pub async fn update_center(&self, center_id: &str, center: &Center) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::CENTERS)
            .document_id(center_id)
            .object(center)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a center record. No soft-delete; the document is gone.
    pub async fn delete_center(&self, center_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::CENTERS)
            .document_id(center_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
