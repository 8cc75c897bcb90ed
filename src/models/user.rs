//! User model for storage and API.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Role attached to a stored user. Stored as a lowercase string in
/// Firestore and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Default role for everyone who signs up through the public form.
    Citizen,
    /// Administrator: may change roles and approve/reject centers.
    Authority,
    /// A vaccination center account.
    Center,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Authority => "authority",
            Role::Center => "center",
        }
    }

    /// Parse a role from its wire form. Unknown strings are rejected by
    /// the caller as invalid input before any lookup happens.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "citizen" => Some(Role::Citizen),
            "authority" => Some(Role::Authority),
            "center" => Some(Role::Center),
            _ => None,
        }
    }
}

/// User profile stored in Firestore.
///
/// The profile is created only after the identity provider has accepted
/// the account, so `firebase_uid` always refers to a real provider
/// account. There is exactly one profile per provider uid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned document ID (not persisted inside the document)
    #[serde(default, alias = "_firestore_id", skip_serializing)]
    pub id: Option<String>,
    /// Identity-provider account id; immutable after creation
    pub firebase_uid: String,
    /// Email address
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Display name, derived at creation as "first last"
    pub display_name: String,
    /// Role, changed only through the admin workflow
    pub role: Role,
    /// Whether the provider has confirmed the email address
    pub email_verified: bool,
    /// When the profile was created (RFC 3339)
    pub created_at: String,
}

impl User {
    /// Build a fresh citizen profile for a newly created provider account.
    pub fn new_citizen(firebase_uid: &str, email: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            id: None,
            firebase_uid: firebase_uid.to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            display_name: format!("{} {}", first_name, last_name),
            role: Role::Citizen,
            email_verified: false,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}
