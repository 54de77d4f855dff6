//! Category repository over the document store.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::categories_model::{Category, NewCategory};
use super::categories_traits::CategoryRepositoryTrait;
use crate::errors::Result;
use crate::store::{DocumentKind, DocumentQuery, DocumentStore};

/// Repository for category documents.
pub struct CategoryRepository {
    store: Arc<dyn DocumentStore>,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository instance.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn materialize(doc: Value) -> Result<Category> {
        Ok(serde_json::from_value(doc)?)
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn get_by_id(&self, category_id: &str) -> Result<Category> {
        let doc = self.store.get(category_id).await?;
        Self::materialize(doc)
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let query = DocumentQuery::for_kind(DocumentKind::Category);
        let docs = self.store.find(&query).await?;
        docs.into_iter().map(Self::materialize).collect()
    }

    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        let doc = serde_json::to_value(&new_category)?;
        let id = self.store.post(DocumentKind::Category, doc).await?;
        self.get_by_id(&id).await
    }

    async fn put(&self, category: &Category) -> Result<()> {
        let doc = serde_json::to_value(category)?;
        self.store.put(DocumentKind::Category, doc).await
    }

    async fn delete(&self, category_id: &str) -> Result<()> {
        self.store.remove(category_id).await
    }
}
