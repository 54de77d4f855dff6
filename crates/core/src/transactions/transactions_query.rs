//! Query composition for transaction listings.
//!
//! Translates user-facing [`FetchOptions`] into an immutable
//! [`DocumentQuery`]. All active filter clauses are ANDed; a caller
//! requesting both a category id and "only uncategorized" composes a
//! self-contradictory, always-empty query, which is accepted as-is.

use super::transactions_constants::INTERNAL_TRANSFER_CATEGORY_ID;
use super::transactions_model::{DateRange, FetchOptions};
use crate::store::{CategoryClause, DocumentKind, DocumentQuery};

/// Composes the filtered, sorted, paginated query for a transaction fetch.
pub fn compose_fetch_query(options: &FetchOptions) -> DocumentQuery {
    let filters = &options.filters;

    let mut clause = CategoryClause::default();
    if let Some(category_id) = &filters.category_id {
        clause.equals = Some(category_id.clone());
    }
    if filters.show_only_uncategorized {
        clause.must_not_exist = true;
    }
    if !filters.show_account_transfers {
        clause.not_equals = Some(INTERNAL_TRANSFER_CATEGORY_ID.to_string());
    }

    let mut query = DocumentQuery::for_kind(DocumentKind::Transaction)
        .date_between(filters.date_from.as_deref(), filters.date_to.as_deref())
        .category(clause)
        .sort_by_date(options.order_by)
        .paginate(options.pagination.per_page, options.pagination.page);

    if let Some(account_id) = &filters.account_id {
        query = query.account_id(account_id);
    }

    query
}

/// Query matching any transaction carrying the given content checksum.
pub fn checksum_query(checksum: &str) -> DocumentQuery {
    DocumentQuery::for_kind(DocumentKind::Transaction).checksum(checksum)
}

/// Query matching in-range transactions with no `categoryId` field.
pub fn uncategorized_count_query(range: &DateRange) -> DocumentQuery {
    DocumentQuery::for_kind(DocumentKind::Transaction)
        .date_between(Some(&range.date_from), Some(&range.date_to))
        .category(CategoryClause {
            must_not_exist: true,
            ..Default::default()
        })
}
