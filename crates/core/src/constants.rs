//! Crate-wide constants.

/// Upper bound on the number of documents a single `find` may return.
///
/// Total-row counts are derived by re-running a selector with this limit and
/// counting the returned documents, so any count is implicitly capped here.
pub const MAX_DOCUMENT_COUNT: i64 = 10_000_000;

/// Inclusive lower date bound standing in for "unbounded".
///
/// Dates are ISO `YYYY-MM-DD` strings and range checks are lexicographic,
/// so the empty string sorts before every valid date.
pub const DATE_OPEN_LOWER_BOUND: &str = "";

/// Inclusive upper date bound standing in for "unbounded".
///
/// `"9999"` sorts after every valid `YYYY-MM-DD` string.
pub const DATE_OPEN_UPPER_BOUND: &str = "9999";
