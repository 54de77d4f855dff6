//! Category service.

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::categories_model::{Category, CategoryUpdate, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::Result;

/// Service for managing categories.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    /// Creates a new CategoryService instance with an injected repository.
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;
        debug!("Creating category '{}'", new_category.name);
        self.repository.create(new_category).await
    }

    async fn update_category(
        &self,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category> {
        update.validate()?;
        let mut category = self.repository.get_by_id(category_id).await?;
        update.apply_to(&mut category);
        self.repository.put(&category).await?;
        self.repository.get_by_id(category_id).await
    }

    async fn get_category(&self, category_id: &str) -> Result<Category> {
        self.repository.get_by_id(category_id).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.repository.list().await
    }

    async fn delete_category(&self, category_id: &str) -> Result<()> {
        let category = self.repository.get_by_id(category_id).await?;

        // Orphan any child before removing the parent, so no category is
        // ever left pointing at a missing document.
        let children: Vec<Category> = self
            .repository
            .list()
            .await?
            .into_iter()
            .filter(|c| c.parent.as_deref() == Some(category_id))
            .collect();
        for mut child in children {
            debug!(
                "Clearing parent '{}' from category '{}'",
                category.name, child.name
            );
            child.parent = None;
            self.repository.put(&child).await?;
        }

        self.repository.delete(category_id).await
    }
}
