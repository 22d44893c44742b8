// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::MedxConfig;

/// Longest session lifetime a deployment may configure (30 days).
pub const MAX_TTL_HOURS: u32 = 720;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration, collecting every error.
pub fn validate_config(config: &MedxConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.vault.email_secret.is_empty() {
        errors.push(ConfigError::Validation {
            message: "vault.email_secret must not be empty".to_string(),
        });
    }

    if config.session.ttl_hours == 0 || config.session.ttl_hours > MAX_TTL_HOURS {
        errors.push(ConfigError::Validation {
            message: format!(
                "session.ttl_hours must be between 1 and {MAX_TTL_HOURS}, got {}",
                config.session.ttl_hours
            ),
        });
    }

    let level = config.log.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&MedxConfig::default()).is_ok());
    }

    #[test]
    fn empty_secret_fails() {
        let mut config = MedxConfig::default();
        config.vault.email_secret.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "email_secret"));
    }

    #[test]
    fn ttl_bounds() {
        let mut config = MedxConfig::default();
        config.session.ttl_hours = 0;
        assert!(has_message(&validate_config(&config).unwrap_err(), "ttl_hours"));

        config.session.ttl_hours = MAX_TTL_HOURS + 1;
        assert!(has_message(&validate_config(&config).unwrap_err(), "ttl_hours"));

        config.session.ttl_hours = MAX_TTL_HOURS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = MedxConfig::default();
        config.vault.email_secret.clear();
        config.session.ttl_hours = 0;
        config.log.level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(has_message(&errors, "log.level"));
    }

    #[test]
    fn log_level_case_insensitive() {
        let mut config = MedxConfig::default();
        config.log.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
