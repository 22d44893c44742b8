// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account store trait: the system of record for credentials and sessions.

use async_trait::async_trait;

use crate::error::MedxError;
use crate::types::{AccountId, AccountRecord};

/// Persistence backend for worker/admin accounts.
///
/// The store owns session-token lifecycle: tokens are issued elsewhere and
/// persisted here, and cleared here on logout or expiry.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Finds an account by its obfuscated email token.
    async fn find_by_encrypted_email(
        &self,
        encrypted_email: &str,
    ) -> Result<Option<AccountRecord>, MedxError>;

    /// Finds an account holding the given session token.
    async fn find_by_session_token(&self, token: &str)
    -> Result<Option<AccountRecord>, MedxError>;

    /// Finds an account by id.
    async fn get(&self, id: &AccountId) -> Result<Option<AccountRecord>, MedxError>;

    /// Inserts a new account, failing with [`MedxError::Security`] if another
    /// account already holds the same `encrypted_email` or id.
    ///
    /// The duplicate check and the insert must happen atomically.
    async fn create(&self, record: AccountRecord) -> Result<(), MedxError>;

    /// Inserts or replaces an account.
    async fn save(&self, record: AccountRecord) -> Result<(), MedxError>;
}
