//! Category repository and service traits.

use async_trait::async_trait;

use super::categories_model::{Category, CategoryUpdate, NewCategory};
use crate::errors::Result;

/// Trait defining the contract for Category repository operations.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Retrieves a category by its id. A missing id is a not-found failure.
    async fn get_by_id(&self, category_id: &str) -> Result<Category>;

    /// Lists all categories.
    async fn list(&self) -> Result<Vec<Category>>;

    /// Creates a new category and returns it with its assigned id.
    async fn create(&self, new_category: NewCategory) -> Result<Category>;

    /// Persists the full state of an existing category.
    async fn put(&self, category: &Category) -> Result<()>;

    /// Deletes a category by its id.
    async fn delete(&self, category_id: &str) -> Result<()>;
}

/// Trait defining the contract for Category service operations.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    /// Creates a new category with validation.
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    /// Applies a patch to an existing category.
    async fn update_category(&self, category_id: &str, update: CategoryUpdate)
        -> Result<Category>;

    /// Retrieves a category by id.
    async fn get_category(&self, category_id: &str) -> Result<Category>;

    /// Lists all categories.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Deletes a category. Categories referencing it as parent become
    /// top-level; transactions keep their category id.
    async fn delete_category(&self, category_id: &str) -> Result<()>;
}
