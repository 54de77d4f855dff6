//! Transaction domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::checksum::compute_checksum;
use super::transactions_constants::DEFAULT_PER_PAGE;
use crate::accounts::Account;
use crate::errors::ValidationError;
use crate::store::SortDirection;
use crate::{Error, Result};

/// Whether a transaction credits or debits the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    /// The wire/view key for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "CREDIT",
            TransactionType::Debit => "DEBIT",
        }
    }
}

/// Domain model representing a transaction.
///
/// `account` and `linked_to_transaction` are request-scoped hydration
/// results attached by the association resolver; they are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Calendar date, ISO `YYYY-MM-DD`.
    pub date: String,
    /// Signed exact decimal; negative = debit, positive = credit.
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub name: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Id of the reciprocal transaction when reconciled as a transfer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_to: Option<String>,
    /// Content fingerprint, derived - see the checksum module.
    pub checksum: String,
    #[serde(skip)]
    pub account: Option<Account>,
    #[serde(skip)]
    pub linked_to_transaction: Option<Box<Transaction>>,
}

impl Transaction {
    /// Recomputes the checksum from the current field values.
    ///
    /// Called at every write so the persisted checksum always reflects the
    /// merged field set.
    pub fn refresh_checksum(&mut self) {
        self.checksum = compute_checksum(
            &self.amount,
            &self.date,
            &self.name,
            &self.memo,
            self.transaction_type,
        );
    }
}

/// Input model for creating a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub date: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub name: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl NewTransaction {
    /// The content checksum this transaction will be persisted with.
    pub fn checksum(&self) -> String {
        compute_checksum(
            &self.amount,
            &self.date,
            &self.name,
            &self.memo,
            self.transaction_type,
        )
    }

    /// Validates the new transaction data.
    pub fn validate(&self) -> Result<()> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Transaction date must be YYYY-MM-DD, got '{}'",
                self.date
            )))
        })?;
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing transaction.
///
/// Present fields overwrite the stored value; absent fields are left
/// untouched (shallow merge). The checksum is recomputed from the merged
/// field set at write time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub date: Option<String>,
    pub amount: Option<Decimal>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub name: Option<String>,
    pub memo: Option<String>,
    pub category_id: Option<String>,
    pub account_id: Option<String>,
}

impl TransactionUpdate {
    /// Shallow-merges the patch over an existing transaction.
    pub fn apply_to(self, transaction: &mut Transaction) {
        if let Some(date) = self.date {
            transaction.date = date;
        }
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(transaction_type) = self.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(name) = self.name {
            transaction.name = name;
        }
        if let Some(memo) = self.memo {
            transaction.memo = memo;
        }
        if let Some(category_id) = self.category_id {
            transaction.category_id = Some(category_id);
        }
        if let Some(account_id) = self.account_id {
            transaction.account_id = Some(account_id);
        }
    }
}

/// Pagination parameters for transaction listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub per_page: i64,
    pub page: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: 1,
        }
    }
}

/// Filter options for transaction listings. Absent fields mean "no
/// restriction"; absent date bounds give an unbounded range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilters {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub show_account_transfers: bool,
    pub show_only_uncategorized: bool,
    pub category_id: Option<String>,
    pub account_id: Option<String>,
}

/// Options driving a paginated transaction fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Sort direction over the single `date` sort key.
    pub order_by: SortDirection,
    pub pagination: Pagination,
    pub filters: TransactionFilters,
}

/// One page of results plus the total row count for the selector.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult<T> {
    pub result: Vec<T>,
    pub total_rows: usize,
}

/// Inclusive date range for reporting queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub date_from: String,
    pub date_to: String,
}

/// Outcome of a statement import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub num_imported: usize,
    pub num_skipped: usize,
}

/// Summed amounts per transaction type over a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTypeTotals {
    #[serde(rename = "CREDIT")]
    pub credit: Decimal,
    #[serde(rename = "DEBIT")]
    pub debit: Decimal,
}

/// One category's contribution to a reporting summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummaryEntry {
    pub category_id: String,
    pub category_name: String,
    pub category_type: crate::categories::CategoryType,
    pub parent_category_id: Option<String>,
    pub amount: Decimal,
}

/// Category totals split by type: income sorted largest-first, expenses
/// sorted most-negative-first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub income_categories: Vec<CategorySummaryEntry>,
    pub expenses_categories: Vec<CategorySummaryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn transaction() -> Transaction {
        let mut t = Transaction {
            id: "t1".to_string(),
            date: "2017-03-01".to_string(),
            amount: dec!(-42.50),
            transaction_type: TransactionType::Debit,
            name: "COFFEE CO".to_string(),
            memo: "card payment".to_string(),
            category_id: None,
            account_id: Some("a1".to_string()),
            linked_to: None,
            checksum: String::new(),
            account: None,
            linked_to_transaction: None,
        };
        t.refresh_checksum();
        t
    }

    #[test]
    fn hydrated_fields_are_not_serialized() {
        let mut t = transaction();
        t.account = Some(Account {
            id: "a1".to_string(),
            name: "Checking".to_string(),
            financial_institution: "First National".to_string(),
            account_type: "checking".to_string(),
            balance_records: Vec::new(),
        });

        let doc = serde_json::to_value(&t).unwrap();
        assert!(doc.get("account").is_none());
        assert!(doc.get("linkedToTransaction").is_none());
        assert_eq!(doc["type"], json!("DEBIT"));
        assert_eq!(doc["accountId"], json!("a1"));
    }

    #[test]
    fn update_merge_recomputes_checksum_on_content_change() {
        let mut t = transaction();
        let before = t.checksum.clone();

        TransactionUpdate {
            memo: Some("contactless".to_string()),
            ..Default::default()
        }
        .apply_to(&mut t);
        t.refresh_checksum();

        assert_ne!(t.checksum, before);
        assert_eq!(t.name, "COFFEE CO");
    }

    #[test]
    fn category_change_does_not_affect_checksum() {
        let mut t = transaction();
        let before = t.checksum.clone();

        t.category_id = Some("groceries".to_string());
        t.refresh_checksum();

        assert_eq!(t.checksum, before);
    }

    #[test]
    fn new_transaction_rejects_malformed_date() {
        let new = NewTransaction {
            date: "03/01/2017".to_string(),
            amount: dec!(10),
            transaction_type: TransactionType::Credit,
            name: "PAYROLL".to_string(),
            memo: String::new(),
            category_id: None,
            account_id: None,
        };

        assert!(new.validate().is_err());
    }
}
