// SPDX-License-Identifier: MIT
// Copyright 2026 The vaxreg developers

//! Vaccination center model for storage and API.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Where a center operates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub district: String,
    pub address: String,
}

/// Center record stored in Firestore.
///
/// A center starts out pending (`verified = false`) and without a linked
/// identity-provider account; `uid` is filled in once the center creates
/// its own credentials. Rejection deletes the record outright, so the
/// collection only ever holds pending and verified centers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Center {
    /// Store-assigned document ID (not persisted inside the document)
    #[serde(default, alias = "_firestore_id", skip_serializing)]
    pub id: Option<String>,
    /// Identity-provider account id, absent until signup completes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Center display name
    pub center_name: String,
    /// Contact email, unique across centers
    pub email: String,
    /// District and street address
    pub location: Location,
    /// Set to true by administrator approval
    pub verified: bool,
    /// When the record was created (RFC 3339)
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Center {
    /// Build a pending registration, not yet linked to a provider account.
    pub fn new_pending(center_name: &str, email: &str, district: &str, address: &str) -> Self {
        Self {
            id: None,
            uid: None,
            center_name: center_name.to_string(),
            email: email.to_string(),
            location: Location {
                district: district.to_string(),
                address: address.to_string(),
            },
            verified: false,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pending_is_unverified_and_unlinked() {
        let center = Center::new_pending("City Clinic", "c@d.ef", "North", "1 Main St");
        assert!(!center.verified);
        assert!(center.uid.is_none());
        assert!(center.id.is_none());
    }

    #[test]
    fn absent_uid_is_omitted_from_the_document() {
        let center = Center::new_pending("City Clinic", "c@d.ef", "North", "1 Main St");
        let value = serde_json::to_value(&center).unwrap();
        assert!(value.get("uid").is_none());
        assert!(value.get("center_name").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["location"]["district"], "North");
    }
}
