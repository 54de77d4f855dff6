//! Moneta Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for the Moneta ledger:
//! accounts, categories, and the transaction query / import / reconciliation
//! engine. It is storage-agnostic and defines the document-store contract
//! that is implemented by the `moneta-storage-sqlite` crate.

pub mod accounts;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod hydration;
pub mod store;
pub mod transactions;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
