//! Statement-parsing adapter boundary.
//!
//! Turning a raw bank-export format into structured records is an external
//! concern; the import pipeline only consumes this trait. Parsing errors
//! propagate unchanged to the caller of the import.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transactions_model::NewTransaction;
use crate::accounts::Account;
use crate::errors::Result;

/// The account's ending balance as reported by the statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementBalance {
    pub date_time: String,
    pub amount: Decimal,
}

/// A parsed account statement: the transaction records scoped to the owning
/// account, plus the statement's ending balance.
#[derive(Debug, Clone)]
pub struct ParsedStatement {
    pub transactions: Vec<NewTransaction>,
    pub balance: StatementBalance,
}

/// Trait defining the contract for statement-file parsers.
pub trait StatementParser: Send + Sync {
    /// Parses raw statement text into transaction records owned by
    /// `account` and the statement's ending balance.
    fn parse(&self, content: &str, account: &Account) -> Result<ParsedStatement>;
}
