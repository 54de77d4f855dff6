//! Document kinds.
//!
//! The store is schemaless: documents are JSON values. The kind tag is the
//! only structure the store itself knows about, and partitions every query.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// The kind of a persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Transaction,
    Account,
    Category,
}

impl DocumentKind {
    /// The kind tag as stored alongside each document.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Transaction => "Transaction",
            DocumentKind::Account => "Account",
            DocumentKind::Category => "Category",
        }
    }

    /// Parses a stored kind tag.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "Transaction" => Ok(DocumentKind::Transaction),
            "Account" => Ok(DocumentKind::Account),
            "Category" => Ok(DocumentKind::Category),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown document kind: {}",
                other
            )))),
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
