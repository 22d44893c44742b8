// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Worker/admin account lifecycle: registration, login, session validation,
//! logout, and password change.
//!
//! The account store stays the system of record. Every token issued here is
//! persisted to the store before it is returned, and every check reads the
//! stored expiry back through the vault.

use std::sync::Arc;

use medx_core::{AccountId, AccountRecord, AccountStore, Department, Identity, MedxError};
use medx_vault::CredentialVault;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

/// Message for every login failure, so callers cannot tell which half was wrong.
const INVALID_CREDENTIALS: &str = "invalid email or password";

/// A session handed back to the client after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub account_id: AccountId,
    pub token: String,
    /// Epoch milliseconds.
    pub expiry: i64,
}

/// Drives credential checks against an [`AccountStore`].
pub struct SessionManager<S> {
    vault: Arc<CredentialVault>,
    store: S,
}

impl<S: AccountStore> SessionManager<S> {
    pub fn new(vault: Arc<CredentialVault>, store: S) -> Self {
        Self { vault, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn vault(&self) -> &CredentialVault {
        &self.vault
    }

    /// Create a worker account with a hashed password and obfuscated email.
    ///
    /// Empty passwords are refused here since the vault accepts them.
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        departments: Vec<Department>,
        is_admin: bool,
    ) -> Result<AccountId, MedxError> {
        if password.expose_secret().is_empty() {
            return Err(MedxError::Security("password must not be empty".to_string()));
        }

        let encrypted_email = self.vault.obfuscate_email(email);
        // Cheap early exit; `create` below is the authoritative check.
        if self
            .store
            .find_by_encrypted_email(&encrypted_email)
            .await?
            .is_some()
        {
            return Err(MedxError::Security(
                "an account with this email already exists".to_string(),
            ));
        }

        let hashed = self.vault.hash_password(password, None)?;
        let id = AccountId(uuid::Uuid::new_v4().to_string());
        self.store
            .create(AccountRecord {
                id: id.clone(),
                encrypted_email,
                password_hash: hashed.hash,
                salt: hashed.salt,
                departments,
                is_admin,
                session_token: None,
                token_expiry: None,
            })
            .await?;

        info!(account = %id.0, is_admin, "account registered");
        Ok(id)
    }

    /// Check credentials, then issue and persist a fresh session token.
    ///
    /// A new login replaces any session the account already had.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<IssuedSession, MedxError> {
        let encrypted_email = self.vault.obfuscate_email(email);
        let Some(mut record) = self.store.find_by_encrypted_email(&encrypted_email).await? else {
            debug!("login for unknown email");
            return Err(MedxError::Security(INVALID_CREDENTIALS.to_string()));
        };

        if !self
            .vault
            .verify_password(password, &record.password_hash, &record.salt)?
        {
            warn!(account = %record.id.0, "login with wrong password");
            return Err(MedxError::Security(INVALID_CREDENTIALS.to_string()));
        }

        let issued = self.vault.issue_session()?;
        record.session_token = Some(issued.token.clone());
        record.token_expiry = Some(issued.expiry);
        let account_id = record.id.clone();
        self.store.save(record).await?;

        info!(account = %account_id.0, expiry = issued.expiry, "worker logged in");
        Ok(IssuedSession {
            account_id,
            token: issued.token,
            expiry: issued.expiry,
        })
    }

    /// Resolve a bearer token to the identity it grants.
    ///
    /// Expired tokens are cleared from the store before the error is returned.
    pub async fn validate(&self, token: &str) -> Result<Identity, MedxError> {
        let Some(mut record) = self.store.find_by_session_token(token).await? else {
            return Err(MedxError::Security("unknown session token".to_string()));
        };

        let expired = match record.token_expiry {
            Some(expiry) => self.vault.is_token_expired(expiry),
            None => true,
        };
        if expired {
            debug!(account = %record.id.0, "session expired");
            record.clear_session();
            self.store.save(record).await?;
            return Err(MedxError::Security("session expired".to_string()));
        }

        Ok(record.identity())
    }

    /// Clear the session holding `token`. Unknown tokens are not an error.
    pub async fn logout(&self, token: &str) -> Result<(), MedxError> {
        if let Some(mut record) = self.store.find_by_session_token(token).await? {
            record.clear_session();
            let id = record.id.clone();
            self.store.save(record).await?;
            info!(account = %id.0, "worker logged out");
        }
        Ok(())
    }

    /// Replace the password after checking the current one. Any open session
    /// is ended.
    pub async fn change_password(
        &self,
        email: &str,
        current: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), MedxError> {
        if new_password.expose_secret().is_empty() {
            return Err(MedxError::Security("password must not be empty".to_string()));
        }

        let encrypted_email = self.vault.obfuscate_email(email);
        let Some(mut record) = self.store.find_by_encrypted_email(&encrypted_email).await? else {
            return Err(MedxError::Security(INVALID_CREDENTIALS.to_string()));
        };
        if !self
            .vault
            .verify_password(current, &record.password_hash, &record.salt)?
        {
            return Err(MedxError::Security(INVALID_CREDENTIALS.to_string()));
        }

        let hashed = self.vault.hash_password(new_password, None)?;
        record.password_hash = hashed.hash;
        record.salt = hashed.salt;
        record.clear_session();
        let id = record.id.clone();
        self.store.save(record).await?;

        info!(account = %id.0, "password changed");
        Ok(())
    }

    /// The plaintext email of an account, if the stored token still decodes.
    pub async fn account_email(&self, id: &AccountId) -> Result<Option<String>, MedxError> {
        let record = self.store.get(id).await?.ok_or_else(|| MedxError::NotFound {
            kind: "account".to_string(),
            key: id.0.clone(),
        })?;
        Ok(self.vault.reveal_email(&record.encrypted_email))
    }
}
