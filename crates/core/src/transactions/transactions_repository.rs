//! Transaction repository over the document store.

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::transactions_errors::TransactionError;
use super::transactions_model::{DateRange, NewTransaction, Transaction, TransactionType};
use super::transactions_query::checksum_query;
use super::transactions_traits::TransactionRepositoryTrait;
use crate::errors::Result;
use crate::store::{DocumentKind, DocumentQuery, DocumentStore};

/// Repository for transaction documents.
pub struct TransactionRepository {
    store: Arc<dyn DocumentStore>,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository instance.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn materialize(doc: Value) -> Result<Transaction> {
        Ok(serde_json::from_value(doc)?)
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn find(&self, query: &DocumentQuery) -> Result<Vec<Transaction>> {
        let docs = self.store.find(query).await?;
        docs.into_iter().map(Self::materialize).collect()
    }

    async fn count(&self, query: &DocumentQuery) -> Result<usize> {
        // Not a streaming count: the selector is re-run without pagination
        // and the returned documents are counted, which caps the result at
        // MAX_DOCUMENT_COUNT.
        let docs = self.store.find(&query.count_variant()).await?;
        Ok(docs.len())
    }

    async fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let doc = self.store.get(transaction_id).await?;
        Self::materialize(doc)
    }

    async fn save_new(&self, new_transaction: NewTransaction) -> Result<String> {
        new_transaction.validate()?;
        let checksum = new_transaction.checksum();

        // Check-then-insert: the store enforces no uniqueness, so two
        // concurrent writers can both pass this check. A single logical
        // writer per statement import is assumed.
        let existing = self.store.find(&checksum_query(&checksum)).await?;
        if !existing.is_empty() {
            return Err(TransactionError::AlreadyImported(checksum).into());
        }

        let mut doc = serde_json::to_value(&new_transaction)?;
        doc["checksum"] = Value::String(checksum);
        let id = self.store.post(DocumentKind::Transaction, doc).await?;
        debug!("Saved new transaction {}", id);
        Ok(id)
    }

    async fn put(&self, transaction: &Transaction) -> Result<()> {
        let mut transaction = transaction.clone();
        transaction.refresh_checksum();
        let doc = serde_json::to_value(&transaction)?;
        self.store.put(DocumentKind::Transaction, doc).await
    }

    async fn delete(&self, transaction_id: &str) -> Result<()> {
        self.store.get(transaction_id).await?;
        self.store.remove(transaction_id).await
    }

    async fn find_by_amount(&self, amount: &Decimal) -> Result<Vec<Transaction>> {
        let docs = self.store.query_by_amount(amount).await?;
        docs.into_iter().map(Self::materialize).collect()
    }

    async fn sum_for_type(
        &self,
        transaction_type: TransactionType,
        range: &DateRange,
    ) -> Result<Option<Decimal>> {
        self.store
            .query_by_type(transaction_type.as_str(), &range.date_from, &range.date_to)
            .await
    }

    async fn sums_by_category(&self, range: &DateRange) -> Result<HashMap<String, Decimal>> {
        self.store
            .query_by_category(&range.date_from, &range.date_to)
            .await
    }
}
