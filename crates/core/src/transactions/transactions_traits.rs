//! Transaction repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;

use super::transactions_model::{
    CategorySummary, DateRange, FetchOptions, ImportResult, NewTransaction, PaginationResult,
    Transaction, TransactionType, TransactionTypeTotals, TransactionUpdate,
};
use crate::errors::Result;
use crate::store::DocumentQuery;

/// Trait defining the contract for Transaction repository operations.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Executes a composed query, materializing each document.
    async fn find(&self, query: &DocumentQuery) -> Result<Vec<Transaction>>;

    /// Total row count for a selector, derived by re-running it without
    /// pagination and counting the returned documents.
    async fn count(&self, query: &DocumentQuery) -> Result<usize>;

    /// Retrieves a transaction by id. A missing id is a not-found failure.
    async fn get_by_id(&self, transaction_id: &str) -> Result<Transaction>;

    /// Persists a new transaction unless one with the same content checksum
    /// already exists, in which case it fails with
    /// `TransactionError::AlreadyImported`. Returns the new id.
    async fn save_new(&self, new_transaction: NewTransaction) -> Result<String>;

    /// Persists the full state of an existing transaction, recomputing its
    /// checksum from the current field values.
    async fn put(&self, transaction: &Transaction) -> Result<()>;

    /// Reads then deletes a transaction.
    async fn delete(&self, transaction_id: &str) -> Result<()>;

    /// Transactions whose amount equals `amount` exactly, ordered by date
    /// descending.
    async fn find_by_amount(&self, amount: &Decimal) -> Result<Vec<Transaction>>;

    /// Summed amount for one transaction type over a date range, `None`
    /// when nothing matches.
    async fn sum_for_type(
        &self,
        transaction_type: TransactionType,
        range: &DateRange,
    ) -> Result<Option<Decimal>>;

    /// Per-category summed amounts over a date range.
    async fn sums_by_category(&self, range: &DateRange) -> Result<HashMap<String, Decimal>>;
}

/// Trait defining the contract for Transaction service operations.
///
/// These are the sole entry points exposed to the presentation/state layer.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Fetches a filtered, sorted page of transactions with hydrated
    /// associations, plus the selector's total row count.
    async fn fetch(&self, options: FetchOptions) -> Result<PaginationResult<Transaction>>;

    /// Fetches a single transaction by id with hydrated associations.
    async fn fetch_by_id(&self, transaction_id: &str) -> Result<Transaction>;

    /// Creates a transaction (deduplicated by checksum) and returns it
    /// hydrated.
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Merges a patch over a stored transaction and returns it hydrated.
    async fn update(&self, transaction_id: &str, update: TransactionUpdate)
        -> Result<Transaction>;

    /// Deletes a transaction. No cascading effects.
    async fn delete(&self, transaction_id: &str) -> Result<()>;

    /// Sets a transaction's category without touching its checksum.
    async fn update_category(&self, transaction_id: &str, category_id: &str) -> Result<()>;

    /// Imports a statement file for an account: parses, deduplicates, and
    /// persists records, then appends the statement's ending balance to the
    /// account's history.
    async fn import_account_statement(
        &self,
        account_id: &str,
        statement_path: &Path,
    ) -> Result<ImportResult>;

    /// Transactions with the exact negated amount, most recent first, each
    /// hydrated with its account.
    async fn fetch_transaction_link_candidates(
        &self,
        transaction: &Transaction,
    ) -> Result<Vec<Transaction>>;

    /// Reciprocally links two transactions as an internal transfer.
    async fn link_transactions(&self, t1: Transaction, t2: Transaction) -> Result<()>;

    /// Summed credit and debit amounts over a date range.
    async fn sum_by_type(&self, range: &DateRange) -> Result<TransactionTypeTotals>;

    /// Per-category totals over a date range, split and sorted by category
    /// type.
    async fn sum_by_category(&self, range: &DateRange) -> Result<CategorySummary>;

    /// Count of in-range transactions with no category.
    async fn fetch_uncategorized_transactions_count(&self, range: &DateRange) -> Result<usize>;
}
