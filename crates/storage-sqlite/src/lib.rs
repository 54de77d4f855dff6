//! SQLite document-store implementation for Moneta.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the [`DocumentStore`] trait defined in
//! `moneta-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The `documents` table backing the schemaless store
//! - The aggregate views over the transaction partition
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. `moneta-core` is database-agnostic and works with traits.
//!
//! ```text
//!        moneta-core (domain)
//!                │
//!                ▼
//!     moneta-storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```
//!
//! [`DocumentStore`]: moneta_core::store::DocumentStore

pub mod db;
pub mod documents;
pub mod errors;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export the store implementation
pub use documents::SqliteDocumentStore;

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from moneta-core for convenience
pub use moneta_core::errors::{Error, Result, StoreError};
