// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the MedXplore credential workspace.
//!
//! TOML configuration with strict key checking, XDG file hierarchy lookup,
//! `MEDX_*` environment overrides, and miette diagnostics with typo
//! suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use medx_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("session ttl: {}h", config.session.ttl_hours);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{LEGACY_EMAIL_SECRET, LogConfig, MedxConfig, SessionConfig, VaultConfig};

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<MedxConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load configuration from an explicit file and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<MedxConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<MedxConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string("medx.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("medx.toml").display().to_string())
            .unwrap_or_else(|_| "medx.toml".to_string());
        sources.push((path, content));
    }

    if let Some(path) = loader::user_config_path()
        && let Ok(content) = std::fs::read_to_string(&path)
    {
        sources.push((path.display().to_string(), content));
    }

    let system_path = std::path::Path::new("/etc/medx/medx.toml");
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_config_validates() {
        let config = load_and_validate_str("[session]\nttl_hours = 8\n").unwrap();
        assert_eq!(config.session.ttl_hours, 8);
    }

    #[test]
    fn inline_unknown_key_gets_suggestion() {
        let errors = load_and_validate_str("[vault]\nemial_secret = \"k\"\n").unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { key, suggestion: Some(s), .. }
                if key == "emial_secret" && s == "email_secret"
        )));
    }

    #[test]
    fn inline_validation_failure() {
        let errors = load_and_validate_str("[vault]\nemail_secret = \"\"\n").unwrap_err();
        assert!(matches!(errors[0], ConfigError::Validation { .. }));
    }

    #[test]
    fn inline_wrong_type() {
        let errors = load_and_validate_str("[session]\nttl_hours = \"long\"\n").unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("ttl_hours")))
        );
    }
}
