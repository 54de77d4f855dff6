//! The SQLite-backed document store.
//!
//! Reads run on pooled connections; every write goes through the
//! single-writer actor. Only the kind and date-range parts of a selector are
//! pushed down to SQL - the remaining clauses live in the document body, so
//! they are evaluated with the shared selector semantics after loading the
//! candidate rows.

use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use super::model::DocumentRow;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::documents::dsl as docs;
use moneta_core::errors::{Error, Result, StoreError};
use moneta_core::store::{DocumentKind, DocumentQuery, DocumentStore};

/// [`DocumentStore`] implementation over a single `documents` table.
pub struct SqliteDocumentStore {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteDocumentStore {
    /// Creates a new SqliteDocumentStore instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    /// Loads the bodies of one kind partition, optionally restricted to an
    /// inclusive date range on the indexed date column.
    fn load_bodies(
        &self,
        kind: DocumentKind,
        date_range: Option<(&str, &str)>,
    ) -> Result<Vec<Value>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = docs::documents
            .into_boxed()
            .filter(docs::kind.eq(kind.as_str()));
        if let Some((from, to)) = date_range {
            query = query.filter(docs::date.ge(from.to_string()));
            query = query.filter(docs::date.le(to.to_string()));
        }

        let rows = query
            .select(DocumentRow::as_select())
            .load::<DocumentRow>(&mut conn)
            .into_core()?;

        rows.into_iter().map(DocumentRow::into_body).collect()
    }
}

/// Reads a transaction amount out of a stored body.
fn body_amount(doc: &Value) -> Result<Decimal> {
    let parsed = match doc.get("amount") {
        Some(Value::String(s)) => Decimal::from_str(s).ok(),
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        Error::Store(StoreError::Serialization(format!(
            "Document {} has no readable amount",
            doc.get("id").and_then(Value::as_str).unwrap_or("?")
        )))
    })
}

fn body_date(doc: &Value) -> &str {
    doc.get("date").and_then(Value::as_str).unwrap_or_default()
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get(&self, id: &str) -> Result<Value> {
        let mut conn = get_connection(&self.pool)?;

        let row = docs::documents
            .find(id)
            .select(DocumentRow::as_select())
            .first::<DocumentRow>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::Store(StoreError::NotFound(id.to_string())))?;

        row.into_body()
    }

    async fn put(&self, kind: DocumentKind, doc: Value) -> Result<()> {
        let id = doc
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::Store(StoreError::Serialization(
                    "Document body has no id field".to_string(),
                ))
            })?
            .to_string();
        let row = DocumentRow::from_body(id, kind, &doc)?;

        self.writer
            .exec(move |conn| {
                diesel::replace_into(docs::documents)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn post(&self, kind: DocumentKind, doc: Value) -> Result<String> {
        let mut doc = doc;
        if !doc.is_object() {
            return Err(Error::Store(StoreError::Serialization(
                "Document body is not an object".to_string(),
            )));
        }
        let id = uuid::Uuid::new_v4().to_string();
        doc["id"] = Value::String(id.clone());
        let row = DocumentRow::from_body(id.clone(), kind, &doc)?;

        self.writer
            .exec(move |conn| {
                diesel::insert_into(docs::documents)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;

        debug!("Stored new {} document {}", kind, id);
        Ok(id)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(docs::documents.find(&id))
                    .execute(conn)
                    .into_core()?;
                if deleted == 0 {
                    return Err(Error::Store(StoreError::NotFound(id)));
                }
                Ok(())
            })
            .await
    }

    async fn find(&self, query: &DocumentQuery) -> Result<Vec<Value>> {
        let bodies = self.load_bodies(query.kind(), query.date_range())?;
        Ok(query.apply(bodies))
    }

    async fn query_by_amount(&self, amount: &Decimal) -> Result<Vec<Value>> {
        let bodies = self.load_bodies(DocumentKind::Transaction, None)?;
        let mut matched = Vec::new();
        for doc in bodies {
            if &body_amount(&doc)? == amount {
                matched.push(doc);
            }
        }
        matched.sort_by(|a, b| body_date(b).cmp(body_date(a)));
        Ok(matched)
    }

    async fn query_by_type(
        &self,
        type_key: &str,
        date_from: &str,
        date_to: &str,
    ) -> Result<Option<Decimal>> {
        let bodies =
            self.load_bodies(DocumentKind::Transaction, Some((date_from, date_to)))?;

        let mut total: Option<Decimal> = None;
        for doc in bodies {
            if doc.get("type").and_then(Value::as_str) == Some(type_key) {
                let amount = body_amount(&doc)?;
                total = Some(total.unwrap_or(Decimal::ZERO) + amount);
            }
        }
        Ok(total)
    }

    async fn query_by_category(
        &self,
        date_from: &str,
        date_to: &str,
    ) -> Result<HashMap<String, Decimal>> {
        let bodies =
            self.load_bodies(DocumentKind::Transaction, Some((date_from, date_to)))?;

        let mut sums: HashMap<String, Decimal> = HashMap::new();
        for doc in bodies {
            if let Some(category_id) = doc.get("categoryId").and_then(Value::as_str) {
                let amount = body_amount(&doc)?;
                *sums.entry(category_id.to_string()).or_insert(Decimal::ZERO) += amount;
            }
        }
        Ok(sums)
    }
}
