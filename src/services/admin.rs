// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Administrative workflow: dashboard lists, role assignment, and center
//! approval/rejection.
//!
//! Every privileged call, reads included, re-resolves the acting uid to a
//! stored profile and demands the `authority` role; no session state or
//! cached authorization is trusted across calls. Each mutation is a
//! single-record read-modify-write with an all-or-nothing outcome.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Center, Role, User};
use crate::services::IdentityService;

/// Role-gated administrative operations backing the dashboard.
#[derive(Clone)]
pub struct AdminService {
    db: FirestoreDb,
    identity: IdentityService,
}

impl AdminService {
    pub fn new(db: FirestoreDb, identity: IdentityService) -> Self {
        Self { db, identity }
    }

    /// Resolve the acting uid to a stored user and require the
    /// `authority` role.
    ///
    /// A missing profile and a non-authority profile are the same failure:
    /// the caller only learns that permission was denied.
    async fn require_authority(&self, admin_uid: &str) -> Result<User, AppError> {
        match self.db.get_user_by_uid(admin_uid).await? {
            Some(user) if user.role == Role::Authority => Ok(user),
            _ => {
                tracing::warn!(admin_uid, "Privileged call rejected: not an authority");
                Err(AppError::PermissionDenied)
            }
        }
    }

    /// Assign a role to a user.
    ///
    /// Checked in order: actor holds `authority`; target exists; target is
    /// not the actor themselves. Administrators demote other administrators,
    /// never themselves, so one authority always remains able to act.
    pub async fn assign_role(
        &self,
        target_user_id: &str,
        new_role: Role,
        admin_uid: &str,
    ) -> Result<(), AppError> {
        let admin = self.require_authority(admin_uid).await?;

        let target = self
            .db
            .get_user(target_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        if target.firebase_uid == admin.firebase_uid {
            return Err(AppError::SelfRoleChange);
        }

        let mut updated = target;
        updated.role = new_role;
        self.db.update_user(target_user_id, &updated).await?;

        tracing::info!(
            target_user_id,
            role = new_role.as_str(),
            admin_uid,
            "Role assigned"
        );
        Ok(())
    }

    /// Mark a center as verified.
    ///
    /// Idempotent: approving an already-verified center succeeds without
    /// another write.
    pub async fn approve_center(&self, center_id: &str, admin_uid: &str) -> Result<(), AppError> {
        self.require_authority(admin_uid).await?;

        let center = self
            .db
            .get_center(center_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Center".to_string()))?;

        if center.verified {
            tracing::debug!(center_id, "Center already verified (idempotent skip)");
            return Ok(());
        }

        let mut updated = center;
        updated.verified = true;
        self.db.update_center(center_id, &updated).await?;

        tracing::info!(center_id, admin_uid, "Center approved");
        Ok(())
    }

    /// Reject a center: best-effort provider account cleanup, then delete
    /// the record unconditionally. Irreversible.
    pub async fn reject_center(&self, center_id: &str, admin_uid: &str) -> Result<(), AppError> {
        self.require_authority(admin_uid).await?;

        let center = self
            .db
            .get_center(center_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Center".to_string()))?;

        // The record deletion below is authoritative; provider cleanup is
        // advisory and must never block it.
        if let Some(uid) = &center.uid {
            if let Err(e) = self.identity.delete_account(uid).await {
                tracing::warn!(
                    center_id,
                    uid = %uid,
                    error = %e,
                    "Provider account deletion failed, deleting record anyway"
                );
            }
        }

        self.db.delete_center(center_id).await?;

        tracing::info!(center_id, admin_uid, "Center rejected and deleted");
        Ok(())
    }

    /// All users for the dashboard, newest first. Authority only: the full
    /// roster carries every email and role, so reads are gated like writes.
    pub async fn list_users(&self, admin_uid: &str) -> Result<Vec<User>, AppError> {
        self.require_authority(admin_uid).await?;
        self.db.list_users().await
    }

    /// All centers for the dashboard, newest first. Authority only.
    pub async fn list_centers(&self, admin_uid: &str) -> Result<Vec<Center>, AppError> {
        self.require_authority(admin_uid).await?;
        self.db.list_centers().await
    }
}
