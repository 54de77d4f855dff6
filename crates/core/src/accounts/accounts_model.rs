//! Account domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{Error, Result};

/// One point of an account's balance history.
///
/// Records are appended by statement imports and never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRecord {
    pub date_time: String,
    pub amount: Decimal,
}

/// Domain model representing an account in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub financial_institution: String,
    pub account_type: String,
    /// Append-only balance history produced by statement imports.
    #[serde(default)]
    pub balance_records: Vec<BalanceRecord>,
}

impl Account {
    /// Appends a balance record to the account's history.
    pub fn add_balance_record(&mut self, date_time: String, amount: Decimal) {
        self.balance_records.push(BalanceRecord { date_time, amount });
    }
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub financial_institution: String,
    pub account_type: String,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing account.
///
/// The balance history is not part of the update surface; it survives the
/// merge untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub financial_institution: Option<String>,
    pub account_type: Option<String>,
}

impl AccountUpdate {
    /// Shallow-merges the patch over an existing account.
    pub fn apply_to(self, account: &mut Account) {
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(institution) = self.financial_institution {
            account.financial_institution = institution;
        }
        if let Some(account_type) = self.account_type {
            account.account_type = account_type;
        }
    }

    /// Validates the account update data.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Account name cannot be empty".to_string(),
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn balance_records_are_appended_in_order() {
        let mut account = Account {
            id: "a1".to_string(),
            name: "Checking".to_string(),
            financial_institution: "First National".to_string(),
            account_type: "checking".to_string(),
            balance_records: Vec::new(),
        };

        account.add_balance_record("2017-01-31T00:00:00".to_string(), dec!(1200.50));
        account.add_balance_record("2017-02-28T00:00:00".to_string(), dec!(980.00));

        assert_eq!(account.balance_records.len(), 2);
        assert_eq!(account.balance_records[0].amount, dec!(1200.50));
        assert_eq!(account.balance_records[1].date_time, "2017-02-28T00:00:00");
    }

    #[test]
    fn update_merge_preserves_unpatched_fields() {
        let mut account = Account {
            id: "a1".to_string(),
            name: "Checking".to_string(),
            financial_institution: "First National".to_string(),
            account_type: "checking".to_string(),
            balance_records: vec![BalanceRecord {
                date_time: "2017-01-31T00:00:00".to_string(),
                amount: dec!(100),
            }],
        };

        AccountUpdate {
            name: Some("Joint Checking".to_string()),
            financial_institution: None,
            account_type: None,
        }
        .apply_to(&mut account);

        assert_eq!(account.name, "Joint Checking");
        assert_eq!(account.financial_institution, "First National");
        assert_eq!(account.balance_records.len(), 1);
    }
}
