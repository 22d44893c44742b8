// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`AccountStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use medx_core::{AccountId, AccountRecord, AccountStore, MedxError};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, AccountRecord>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_encrypted_email(
        &self,
        encrypted_email: &str,
    ) -> Result<Option<AccountRecord>, MedxError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.encrypted_email == encrypted_email)
            .cloned())
    }

    async fn find_by_session_token(
        &self,
        token: &str,
    ) -> Result<Option<AccountRecord>, MedxError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.session_token.as_deref() == Some(token))
            .cloned())
    }

    async fn get(&self, id: &AccountId) -> Result<Option<AccountRecord>, MedxError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn create(&self, record: AccountRecord) -> Result<(), MedxError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&record.id)
            || accounts
                .values()
                .any(|a| a.encrypted_email == record.encrypted_email)
        {
            return Err(MedxError::Security(
                "an account with this email already exists".to_string(),
            ));
        }
        accounts.insert(record.id.clone(), record);
        Ok(())
    }

    async fn save(&self, record: AccountRecord) -> Result<(), MedxError> {
        self.accounts.write().await.insert(record.id.clone(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, email: &str, token: Option<&str>) -> AccountRecord {
        AccountRecord {
            id: AccountId(id.to_string()),
            encrypted_email: email.to_string(),
            password_hash: String::new(),
            salt: String::new(),
            departments: vec![],
            is_admin: false,
            session_token: token.map(str::to_string),
            token_expiry: None,
        }
    }

    #[tokio::test]
    async fn save_and_lookup() {
        let store = MemoryAccountStore::new();
        assert!(store.is_empty().await);

        store.save(record("a", "enc-a", Some("tok-a"))).await.unwrap();
        store.save(record("b", "enc-b", None)).await.unwrap();
        assert_eq!(store.len().await, 2);

        let by_email = store.find_by_encrypted_email("enc-b").await.unwrap().unwrap();
        assert_eq!(by_email.id, AccountId("b".to_string()));

        let by_token = store.find_by_session_token("tok-a").await.unwrap().unwrap();
        assert_eq!(by_token.id, AccountId("a".to_string()));

        assert!(store.find_by_session_token("missing").await.unwrap().is_none());
        assert!(store.get(&AccountId("zz".into())).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email_and_id() {
        let store = MemoryAccountStore::new();
        store.create(record("a", "enc-a", None)).await.unwrap();

        let same_email = store.create(record("b", "enc-a", None)).await;
        assert!(matches!(same_email, Err(MedxError::Security(_))));

        let same_id = store.create(record("a", "enc-other", None)).await;
        assert!(matches!(same_id, Err(MedxError::Security(_))));

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn save_replaces_by_id() {
        let store = MemoryAccountStore::new();
        store.save(record("a", "enc-a", Some("old"))).await.unwrap();
        store.save(record("a", "enc-a", Some("new"))).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert!(store.find_by_session_token("old").await.unwrap().is_none());
        assert!(store.find_by_session_token("new").await.unwrap().is_some());
    }
}
