// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the vault, auth layer, and account stores.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Department slug meaning "every department".
pub const ALL_DEPARTMENTS: &str = "all";

/// A department slug such as `academic` or `research`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Department(pub String);

impl Department {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// The wildcard department granting access everywhere.
    pub fn all() -> Self {
        Self(ALL_DEPARTMENTS.to_string())
    }

    pub fn is_all(&self) -> bool {
        self.0 == ALL_DEPARTMENTS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Department {
    fn from(slug: &str) -> Self {
        Self::new(slug)
    }
}

/// Unique identifier for a stored account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

/// Coarse role label, used where an identity has to be named on a command
/// line or in a log field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Anonymous,
    Student,
    Worker,
    Admin,
}

/// A resolved identity from either of the portal's two login systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// No session of any kind.
    Anonymous,
    /// Student signed in by passport number (no password).
    Student { passport_number: String },
    /// Staff member with a credential-backed session.
    Worker {
        departments: Vec<Department>,
        is_admin: bool,
    },
    /// Portal administrator.
    Admin,
}

impl Identity {
    pub fn role(&self) -> Role {
        match self {
            Identity::Anonymous => Role::Anonymous,
            Identity::Student { .. } => Role::Student,
            Identity::Worker { is_admin: true, .. } | Identity::Admin => Role::Admin,
            Identity::Worker { .. } => Role::Worker,
        }
    }
}

/// An account as persisted by the account store.
///
/// Field names follow the stored document shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: AccountId,
    pub encrypted_email: String,
    pub password_hash: String,
    pub salt: String,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub session_token: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub token_expiry: Option<i64>,
}

impl AccountRecord {
    /// The identity this account resolves to once a session is validated.
    pub fn identity(&self) -> Identity {
        Identity::Worker {
            departments: self.departments.clone(),
            is_admin: self.is_admin,
        }
    }

    pub fn clear_session(&mut self) {
        self.session_token = None;
        self.token_expiry = None;
    }
}
