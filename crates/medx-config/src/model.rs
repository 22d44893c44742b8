// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Key the portal has always used to obfuscate stored worker emails.
///
/// Changing it makes every previously stored `encryptedEmail` unreadable.
pub const LEGACY_EMAIL_SECRET: &str = "MedXplore2024SecretKey";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MedxConfig {
    /// Credential vault settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Session token settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Credential vault configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Shared key for reversible email obfuscation.
    #[serde(default = "default_email_secret")]
    pub email_secret: String,
}

impl std::fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultConfig")
            .field("email_secret", &"[REDACTED]")
            .finish()
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            email_secret: default_email_secret(),
        }
    }
}

fn default_email_secret() -> String {
    LEGACY_EMAIL_SECRET.to_string()
}

/// Session token configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Lifetime of an issued session token, in hours.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u32,
}

impl SessionConfig {
    pub fn ttl_millis(&self) -> i64 {
        i64::from(self.ttl_hours) * 60 * 60 * 1000
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
        }
    }
}

fn default_ttl_hours() -> u32 {
    24
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
