//! Transaction-specific error types.

use thiserror::Error;

/// Errors specific to transaction operations.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// A transaction with the same content checksum already exists.
    ///
    /// This is a domain-level conflict: the import pipeline treats it as a
    /// duplicate skip, and direct callers of create must handle it.
    #[error("Transaction is already imported (checksum {0})")]
    AlreadyImported(String),

    /// The referenced transaction does not exist.
    #[error("Transaction not found: {0}")]
    NotFound(String),
}
