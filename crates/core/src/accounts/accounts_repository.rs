//! Account repository over the document store.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::accounts_model::{Account, NewAccount};
use super::accounts_traits::AccountRepositoryTrait;
use crate::errors::Result;
use crate::store::{DocumentKind, DocumentQuery, DocumentStore};

/// Repository for account documents.
pub struct AccountRepository {
    store: Arc<dyn DocumentStore>,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn materialize(doc: Value) -> Result<Account> {
        Ok(serde_json::from_value(doc)?)
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let doc = self.store.get(account_id).await?;
        Self::materialize(doc)
    }

    async fn list(&self) -> Result<Vec<Account>> {
        let query = DocumentQuery::for_kind(DocumentKind::Account);
        let docs = self.store.find(&query).await?;
        docs.into_iter().map(Self::materialize).collect()
    }

    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        let doc = serde_json::to_value(&new_account)?;
        let id = self.store.post(DocumentKind::Account, doc).await?;
        self.get_by_id(&id).await
    }

    async fn put(&self, account: &Account) -> Result<()> {
        let doc = serde_json::to_value(account)?;
        self.store.put(DocumentKind::Account, doc).await
    }

    async fn delete(&self, account_id: &str) -> Result<()> {
        self.store.remove(account_id).await
    }
}
