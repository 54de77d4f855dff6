//! Storage-specific error types for SQLite operations.
//!
//! This module provides error types that wrap Diesel-specific errors and
//! convert them to the storage-agnostic error types defined in `moneta_core`.

use diesel::result::Error as DieselError;
use moneta_core::errors::{Error, StoreError};
use thiserror::Error;

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These errors are internal to the storage layer and are converted to
/// `moneta_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Document body error: {0}")]
    BadBody(String),

    /// A core error raised inside a storage job. The error is carried
    /// whole, not stringified, so its kind (NotFound in particular)
    /// survives the trip through the write actor.
    #[error("Core error: {0}")]
    CoreError(Error),
}

/// Convert core Error to StorageError (for the write-actor job wrapper).
impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::CoreError(err)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Store(StoreError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Store(StoreError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Store(StoreError::NotFound("Document not found".to_string()))
            }
            StorageError::QueryFailed(e) => Error::Store(StoreError::QueryFailed(e.to_string())),
            StorageError::MigrationFailed(e) => Error::Store(StoreError::MigrationFailed(e)),
            StorageError::BadBody(e) => Error::Store(StoreError::Serialization(e)),
            StorageError::CoreError(e) => e,
        }
    }
}

/// Extension trait for easily converting Diesel Results to core Results.
///
/// Since we can't implement `From<DieselError> for Error` due to orphan
/// rules, this trait provides a method to perform the conversion.
pub trait IntoCore<T> {
    fn into_core(self) -> moneta_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> moneta_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> moneta_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
