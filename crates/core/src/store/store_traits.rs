//! The document store contract.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::Result;
use crate::store::{DocumentKind, DocumentQuery};

/// Trait defining the contract for the underlying document store.
///
/// Documents are schemaless JSON bodies partitioned by [`DocumentKind`];
/// typed models are validated against the body at this boundary by the
/// repositories. Implementations must report a missing document from
/// [`get`](DocumentStore::get) as `StoreError::NotFound` - callers rely on
/// distinguishing it from other failures.
///
/// The three `query_*` methods correspond to the store's aggregate views
/// over the transaction partition: by amount (descending date), by type
/// (running sum over a date range), and by category (per-category sums over
/// a date range).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches a document body by id, regardless of kind.
    async fn get(&self, id: &str) -> Result<Value>;

    /// Writes a document body carrying an `id` field, replacing any
    /// existing document with that id.
    async fn put(&self, kind: DocumentKind, doc: Value) -> Result<()>;

    /// Inserts a new document, assigning and returning a fresh id. The id
    /// is also written into the stored body's `id` field.
    async fn post(&self, kind: DocumentKind, doc: Value) -> Result<String>;

    /// Removes a document by id. Removing a missing id is a
    /// `StoreError::NotFound` failure.
    async fn remove(&self, id: &str) -> Result<()>;

    /// Executes a composed query and returns matching document bodies in
    /// query order.
    async fn find(&self, query: &DocumentQuery) -> Result<Vec<Value>>;

    /// Transactions whose amount equals `amount` exactly, across the full
    /// date range, ordered by date descending.
    async fn query_by_amount(&self, amount: &Decimal) -> Result<Vec<Value>>;

    /// Sum of transaction amounts for the given type key over the inclusive
    /// date range, or `None` when nothing matches.
    async fn query_by_type(
        &self,
        type_key: &str,
        date_from: &str,
        date_to: &str,
    ) -> Result<Option<Decimal>>;

    /// Per-category sums of transaction amounts over the inclusive date
    /// range. Uncategorized transactions do not contribute.
    async fn query_by_category(
        &self,
        date_from: &str,
        date_to: &str,
    ) -> Result<HashMap<String, Decimal>>;
}
