//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! store-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Retrieves an account by its id. A missing id is a not-found failure.
    async fn get_by_id(&self, account_id: &str) -> Result<Account>;

    /// Lists all accounts.
    async fn list(&self) -> Result<Vec<Account>>;

    /// Creates a new account and returns it with its assigned id.
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Persists the full state of an existing account.
    async fn put(&self, account: &Account) -> Result<()>;

    /// Deletes an account by its id.
    async fn delete(&self, account_id: &str) -> Result<()>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Creates a new account with validation.
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    /// Applies a patch to an existing account.
    async fn update_account(&self, account_id: &str, update: AccountUpdate) -> Result<Account>;

    /// Retrieves an account by id.
    async fn get_account(&self, account_id: &str) -> Result<Account>;

    /// Lists all accounts.
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Deletes an account. Transactions referencing it are left in place.
    async fn delete_account(&self, account_id: &str) -> Result<()>;
}
