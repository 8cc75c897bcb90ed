// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Registration workflows for citizens and centers.
//!
//! Citizen signup is two-phase: create the provider account, then persist
//! the local profile. The two stores are linked by uid only, never
//! transactionally; a profile-write failure after provider signup leaves an
//! orphaned account, which is logged for manual reconciliation.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Center, User};
use crate::services::IdentityService;

/// Public registration operations.
#[derive(Clone)]
pub struct RegistrationService {
    db: FirestoreDb,
    identity: IdentityService,
}

impl RegistrationService {
    pub fn new(db: FirestoreDb, identity: IdentityService) -> Self {
        Self { db, identity }
    }

    /// Register a citizen: provider account first, then the verification
    /// email, then the local profile.
    ///
    /// The provider rejects duplicate emails and weak passwords before any
    /// local write happens, so a failed signup never creates a profile.
    /// The verification email is best-effort; the provider can re-send it
    /// later, so its failure does not abort registration.
    pub async fn register_citizen(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, AppError> {
        let account = self.identity.sign_up(email, password).await?;

        if let Err(e) = self
            .identity
            .send_verification_email(&account.id_token, &account.email)
            .await
        {
            tracing::warn!(
                uid = %account.local_id,
                error = %e,
                "Verification email dispatch failed, continuing registration"
            );
        }

        let user = User::new_citizen(&account.local_id, &account.email, first_name, last_name);
        let created = match self.db.create_user(&user).await {
            Ok(u) => u,
            Err(e) => {
                // The provider account now exists with no profile attached.
                tracing::error!(
                    uid = %account.local_id,
                    email = %account.email,
                    error = %e,
                    "Profile creation failed after provider signup; provider account is orphaned"
                );
                return Err(e);
            }
        };

        tracing::info!(uid = %created.firebase_uid, "Citizen registered");
        Ok(created)
    }

    /// Register a center: a pending record awaiting administrator approval.
    ///
    /// No provider account yet; the center creates its credentials through
    /// [`Self::complete_center_signup`]. Duplicate emails are rejected here
    /// so two centers can never share a contact address.
    pub async fn register_center(
        &self,
        center_name: &str,
        email: &str,
        district: &str,
        address: &str,
    ) -> Result<Center, AppError> {
        if self.db.get_center_by_email(email).await?.is_some() {
            return Err(AppError::EmailInUse);
        }

        let center = Center::new_pending(center_name, email, district, address);
        let created = self.db.create_center(&center).await?;

        tracing::info!(
            center_id = ?created.id,
            district = %created.location.district,
            "Center registration received, awaiting approval"
        );
        Ok(created)
    }

    /// Create provider credentials for a registered center and link the
    /// resulting uid to its record.
    pub async fn complete_center_signup(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Center, AppError> {
        let center = self
            .db
            .get_center_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("Center".to_string()))?;

        if center.uid.is_some() {
            return Err(AppError::EmailInUse);
        }

        let center_id = center
            .id
            .clone()
            .ok_or_else(|| AppError::Database("Center record has no document id".to_string()))?;

        let account = self.identity.sign_up(email, password).await?;

        if let Err(e) = self
            .identity
            .send_verification_email(&account.id_token, &account.email)
            .await
        {
            tracing::warn!(
                uid = %account.local_id,
                error = %e,
                "Verification email dispatch failed, continuing signup"
            );
        }

        let mut updated = center;
        updated.uid = Some(account.local_id.clone());
        self.db.update_center(&center_id, &updated).await?;

        tracing::info!(center_id = %center_id, uid = %account.local_id, "Center signup completed");
        Ok(updated)
    }
}
