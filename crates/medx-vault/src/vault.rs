// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The credential vault facade used by the account/session layer.
//!
//! Stateless apart from its configuration: nothing issued here is remembered,
//! so one vault can be shared across threads and tasks freely.

use std::sync::Arc;

use medx_config::MedxConfig;
use medx_core::{Clock, MedxError, SystemClock};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::kdf::{self, PasswordHash};
use crate::obfuscate::EmailObfuscator;
use crate::token::{self, SessionToken};

/// Password hashing, session tokens, and email obfuscation bound to one
/// configuration.
///
/// Debug output omits the obfuscation key.
pub struct CredentialVault {
    obfuscator: EmailObfuscator,
    ttl_millis: i64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVault")
            .field("obfuscator", &self.obfuscator)
            .field("ttl_millis", &self.ttl_millis)
            .finish_non_exhaustive()
    }
}

impl CredentialVault {
    /// Build a vault from configuration, reading time from the system clock.
    pub fn from_config(config: &MedxConfig) -> Result<Self, MedxError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build a vault from configuration with an explicit clock.
    pub fn with_clock(config: &MedxConfig, clock: Arc<dyn Clock>) -> Result<Self, MedxError> {
        Ok(Self {
            obfuscator: EmailObfuscator::new(&config.vault.email_secret)?,
            ttl_millis: config.session.ttl_millis(),
            clock,
        })
    }

    /// Hash a password with the supplied salt, or a fresh one.
    pub fn hash_password(
        &self,
        password: &SecretString,
        salt: Option<&str>,
    ) -> Result<PasswordHash, MedxError> {
        let hashed = kdf::hash_password(password.expose_secret().as_bytes(), salt)?;
        debug!(fresh_salt = salt.is_none(), "password hashed");
        Ok(hashed)
    }

    /// Re-derive `password` with `salt` and compare against `stored_hash`.
    ///
    /// Returns `Ok(false)` for a wrong password; errors only when the
    /// primitive itself fails.
    pub fn verify_password(
        &self,
        password: &SecretString,
        stored_hash: &str,
        salt: &str,
    ) -> Result<bool, MedxError> {
        let ok = kdf::verify_password(password.expose_secret().as_bytes(), stored_hash, salt)?;
        debug!(ok, "password verified");
        Ok(ok)
    }

    /// A fresh 64-character hex bearer token from the system CSPRNG.
    pub fn generate_secure_token(&self) -> Result<String, MedxError> {
        token::generate_token()
    }

    /// Current time plus the configured session lifetime, in epoch millis.
    pub fn generate_token_expiry(&self) -> i64 {
        token::expiry_from_now(self.clock.as_ref(), self.ttl_millis)
    }

    /// Token and expiry in one step.
    pub fn issue_session(&self) -> Result<SessionToken, MedxError> {
        let issued = SessionToken::issue(self.clock.as_ref(), self.ttl_millis)?;
        debug!(expiry = issued.expiry, "session token issued");
        Ok(issued)
    }

    /// True iff the clock is strictly past `expiry` (epoch millis).
    pub fn is_token_expired(&self, expiry: i64) -> bool {
        token::is_expired(self.clock.as_ref(), expiry)
    }

    /// Obfuscate an email for storage. Reversible by anyone with the key;
    /// this is not encryption.
    pub fn obfuscate_email(&self, plaintext: &str) -> String {
        self.obfuscator.obfuscate(plaintext)
    }

    /// `None` when the stored token cannot be decoded.
    pub fn reveal_email(&self, token: &str) -> Option<String> {
        self.obfuscator.reveal(token)
    }

    /// The clock used for expiry decisions.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use medx_core::FixedClock;

    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn vault_at(now: i64) -> (CredentialVault, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(now));
        let vault = CredentialVault::with_clock(&MedxConfig::default(), clock.clone()).unwrap();
        (vault, clock)
    }

    #[test]
    fn end_to_end_password_case_sensitivity() {
        let (vault, _) = vault_at(0);
        let hashed = vault
            .hash_password(&secret("Secret123!"), None)
            .unwrap();
        assert!(
            vault
                .verify_password(&secret("Secret123!"), &hashed.hash, &hashed.salt)
                .unwrap()
        );
        assert!(
            !vault
                .verify_password(&secret("secret123!"), &hashed.hash, &hashed.salt)
                .unwrap()
        );
    }

    #[test]
    fn expiry_uses_configured_ttl() {
        let mut config = MedxConfig::default();
        config.session.ttl_hours = 1;
        let vault = CredentialVault::with_clock(&config, Arc::new(FixedClock::new(100))).unwrap();
        assert_eq!(vault.generate_token_expiry(), 100 + 3_600_000);
    }

    #[test]
    fn default_expiry_is_24h_and_boundary_is_strict() {
        let (vault, clock) = vault_at(1_000);
        let expiry = vault.generate_token_expiry();
        assert_eq!(expiry, 1_000 + 86_400_000);

        clock.set(expiry);
        assert!(!vault.is_token_expired(expiry));
        clock.advance(1);
        assert!(vault.is_token_expired(expiry));
    }

    #[test]
    fn issue_session_pairs_token_and_expiry() {
        let (vault, _) = vault_at(7);
        let issued = vault.issue_session().unwrap();
        assert_eq!(issued.token.len(), 64);
        assert_eq!(issued.expiry, 7 + 86_400_000);
    }

    #[test]
    fn email_round_trip_and_failure() {
        let (vault, _) = vault_at(0);
        let token = vault.obfuscate_email("student@medxplore.org");
        assert_eq!(
            vault.reveal_email(&token).as_deref(),
            Some("student@medxplore.org")
        );
        assert_eq!(vault.reveal_email("not-valid-base64!!"), None);
    }

    #[test]
    fn empty_secret_config_rejected() {
        let mut config = MedxConfig::default();
        config.vault.email_secret.clear();
        assert!(matches!(
            CredentialVault::from_config(&config),
            Err(MedxError::Config(_))
        ));
    }

    #[test]
    fn debug_omits_secret() {
        let (vault, _) = vault_at(0);
        let rendered = format!("{vault:?}");
        assert!(!rendered.contains(medx_config::LEGACY_EMAIL_SECRET));
    }
}
