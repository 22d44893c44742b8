// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./medx.toml` > `~/.config/medx/medx.toml` > `/etc/medx/medx.toml`
//! with environment variable overrides via `MEDX_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MedxConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/medx/medx.toml`
/// 3. `~/.config/medx/medx.toml`
/// 4. `./medx.toml`
/// 5. `MEDX_*` environment variables
pub fn load_config() -> Result<MedxConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<MedxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MedxConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MedxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MedxConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment used for the standard hierarchy, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MedxConfig::default()))
        .merge(Toml::file("/etc/medx/medx.toml"))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file("medx.toml"))
        .merge(env_provider())
}

/// `~/.config/medx/medx.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("medx/medx.toml"))
}

const ENV_SECTIONS: &[&str] = &["vault_", "session_", "log_"];

/// Env provider with explicit section mapping.
///
/// `MEDX_VAULT_EMAIL_SECRET` must land on `vault.email_secret`, which
/// `Env::split("_")` would turn into `vault.email.secret`. Only section
/// variables are read, so `MEDX_PASSWORD` never reaches the config.
fn env_provider() -> Env {
    Env::prefixed("MEDX_")
        .filter(|key| {
            let key = key.as_str().to_ascii_lowercase();
            ENV_SECTIONS.iter().any(|s| key.starts_with(s))
        })
        .map(|key| {
            // Keys arrive in their original (upper) case with the prefix stripped.
            key.as_str()
                .to_ascii_lowercase()
                .replacen("vault_", "vault.", 1)
                .replacen("session_", "session.", 1)
                .replacen("log_", "log.", 1)
                .into()
        })
}
