//! Content checksum computation for transaction deduplication.
//!
//! The checksum is a deterministic fingerprint of a transaction's
//! identifying content. It backs import dedup (two statement records with
//! the same content collapse into one persisted transaction) and "content
//! changed" detection on update.

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use super::transactions_model::TransactionType;

/// Computes the content checksum for a transaction.
///
/// The digest is built from successive updates in a fixed field order -
/// amount, date, name, memo, type - so changing any one of the five fields
/// changes the checksum. The result is `"sha256:"` followed by the 64-char
/// lowercase hex digest.
pub fn compute_checksum(
    amount: &Decimal,
    date: &str,
    name: &str,
    memo: &str,
    transaction_type: TransactionType,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_amount(amount).as_bytes());
    hasher.update(date.as_bytes());
    hasher.update(name.as_bytes());
    hasher.update(memo.as_bytes());
    hasher.update(transaction_type.as_str().as_bytes());
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Normalizes a decimal to a consistent string form.
///
/// Trailing zeros are stripped so `3500` and `3500.00` fingerprint
/// identically.
fn normalize_amount(amount: &Decimal) -> String {
    amount.normalize().to_string()
}
