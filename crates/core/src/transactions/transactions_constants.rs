/// Sentinel category id marking one half of a reconciled transfer between
/// the user's own accounts. Transactions carrying it are excluded from
/// income/expense reporting and hidden from listings by default.
pub const INTERNAL_TRANSFER_CATEGORY_ID: &str = "internaltransfer";

/// Default page size for transaction listings.
pub const DEFAULT_PER_PAGE: i64 = 10;
