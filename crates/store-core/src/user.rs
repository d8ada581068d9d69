//! # User Types
//!
//! User records keyed by email. The `role` field drives the admin gate:
//! a user is admin only when the record exists and carries `Role::Admin`.

use crate::document::{DocumentId, Record};
use serde::{Deserialize, Serialize};

/// User role flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// No elevated privileges
    Unset,
    /// Full administrative access
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Unset
    }
}

/// A user record. Email is the unique key; upserts match on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document id
    pub id: DocumentId,

    /// Unique key
    pub email: String,

    /// Role flag, mutated only via the admin-gated grant route
    #[serde(default)]
    pub role: Role,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Shipping address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Contact phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    /// Create a new non-admin user
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(),
            email: email.into(),
            role: Role::Unset,
            name: String::new(),
            address: None,
            phone: None,
        }
    }

    /// Check the admin flag
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl Record for User {
    fn id(&self) -> DocumentId {
        self.id
    }
}

/// Profile fields a user may set on themselves (role is never among them)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl UserProfile {
    /// Apply the provided fields to a user record
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(address) = &self.address {
            user.address = Some(address.clone());
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
    }
}
