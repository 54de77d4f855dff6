//! Immutable query descriptors for the document store.
//!
//! A [`DocumentQuery`] is the typed equivalent of a selector + sort +
//! limit/skip triple: an AND of all active clauses over a single document
//! kind. Builders are consuming, so a composed query cannot be mutated
//! after the fact.
//!
//! The descriptor also carries the reference evaluation semantics
//! ([`DocumentQuery::matches`] and [`DocumentQuery::apply`]) so every store
//! implementation and test double shares one definition of the selector
//! contract - inclusive date bounds, absent-field checks, and negation all
//! behave identically everywhere.

use serde_json::Value;

use crate::constants::{DATE_OPEN_LOWER_BOUND, DATE_OPEN_UPPER_BOUND, MAX_DOCUMENT_COUNT};
use crate::store::DocumentKind;

/// Sort direction for the date sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Constraint on the `categoryId` field of a document.
///
/// All active parts are ANDed. A caller may compose a self-contradictory
/// clause (for example `equals` together with `must_not_exist`); the result
/// is an always-empty query, which is accepted caller-input territory and
/// deliberately not rejected here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryClause {
    /// Field must equal this id.
    pub equals: Option<String>,
    /// Field must not exist on the document.
    pub must_not_exist: bool,
    /// Field must not equal this id (an absent field passes).
    pub not_equals: Option<String>,
}

impl CategoryClause {
    /// Whether no constraint is active.
    pub fn is_empty(&self) -> bool {
        self.equals.is_none() && !self.must_not_exist && self.not_equals.is_none()
    }
}

/// A filtered, sorted, paginated query over one document kind.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    kind: DocumentKind,
    date_range: Option<(String, String)>,
    category: CategoryClause,
    account_id: Option<String>,
    checksum: Option<String>,
    sort: Option<SortDirection>,
    limit: i64,
    skip: i64,
}

impl DocumentQuery {
    /// Starts a query restricted to the given kind, with no other clauses,
    /// no sort, and the maximum result limit.
    pub fn for_kind(kind: DocumentKind) -> Self {
        Self {
            kind,
            date_range: None,
            category: CategoryClause::default(),
            account_id: None,
            checksum: None,
            sort: None,
            limit: MAX_DOCUMENT_COUNT,
            skip: 0,
        }
    }

    /// Restricts `date` to the inclusive range `[from, to]`.
    ///
    /// `None` bounds are replaced by the open-bound sentinels (`""` and
    /// `"9999"`), which under lexicographic comparison of ISO dates give an
    /// effectively unbounded range.
    pub fn date_between(mut self, from: Option<&str>, to: Option<&str>) -> Self {
        let from = match from {
            Some(f) if !f.is_empty() => f.to_string(),
            _ => DATE_OPEN_LOWER_BOUND.to_string(),
        };
        let to = match to {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => DATE_OPEN_UPPER_BOUND.to_string(),
        };
        self.date_range = Some((from, to));
        self
    }

    /// Applies a constraint on the `categoryId` field.
    pub fn category(mut self, clause: CategoryClause) -> Self {
        self.category = clause;
        self
    }

    /// Requires `accountId` to equal the given id.
    pub fn account_id(mut self, account_id: &str) -> Self {
        self.account_id = Some(account_id.to_string());
        self
    }

    /// Requires `checksum` to equal the given value.
    pub fn checksum(mut self, checksum: &str) -> Self {
        self.checksum = Some(checksum.to_string());
        self
    }

    /// Sorts results by `date` in the given direction.
    pub fn sort_by_date(mut self, direction: SortDirection) -> Self {
        self.sort = Some(direction);
        self
    }

    /// Applies pagination: `limit = per_page`, `skip = (page - 1) * per_page`.
    pub fn paginate(mut self, per_page: i64, page: i64) -> Self {
        self.limit = per_page;
        self.skip = (page - 1).max(0) * per_page;
        self
    }

    /// The same selector with no pagination, used to derive total-row
    /// counts by counting returned documents.
    pub fn count_variant(&self) -> Self {
        let mut query = self.clone();
        query.limit = MAX_DOCUMENT_COUNT;
        query.skip = 0;
        query
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn date_range(&self) -> Option<(&str, &str)> {
        self.date_range
            .as_ref()
            .map(|(from, to)| (from.as_str(), to.as_str()))
    }

    pub fn sort(&self) -> Option<SortDirection> {
        self.sort
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn skip(&self) -> i64 {
        self.skip
    }

    /// Whether a document body satisfies every active clause.
    ///
    /// The kind restriction is not checked here; stores partition documents
    /// by kind before evaluating selectors.
    pub fn matches(&self, doc: &Value) -> bool {
        if let Some((from, to)) = self.date_range() {
            match string_field(doc, "date") {
                Some(date) => {
                    if date < from || date > to {
                        return false;
                    }
                }
                None => return false,
            }
        }

        let category_id = string_field(doc, "categoryId");
        if let Some(expected) = &self.category.equals {
            if category_id != Some(expected.as_str()) {
                return false;
            }
        }
        if self.category.must_not_exist && category_id.is_some() {
            return false;
        }
        if let Some(excluded) = &self.category.not_equals {
            if category_id == Some(excluded.as_str()) {
                return false;
            }
        }

        if let Some(expected) = &self.account_id {
            if string_field(doc, "accountId") != Some(expected.as_str()) {
                return false;
            }
        }

        if let Some(expected) = &self.checksum {
            if string_field(doc, "checksum") != Some(expected.as_str()) {
                return false;
            }
        }

        true
    }

    /// Reference implementation of filter + sort + slice over a full kind
    /// partition. Store backends that cannot push clauses down delegate to
    /// this to stay contract-identical.
    pub fn apply(&self, docs: Vec<Value>) -> Vec<Value> {
        let mut matched: Vec<Value> = docs.into_iter().filter(|d| self.matches(d)).collect();

        if let Some(direction) = self.sort {
            matched.sort_by(|a, b| {
                let da = string_field(a, "date").unwrap_or_default();
                let db = string_field(b, "date").unwrap_or_default();
                match direction {
                    SortDirection::Asc => da.cmp(db),
                    SortDirection::Desc => db.cmp(da),
                }
            });
        }

        matched
            .into_iter()
            .skip(self.skip.max(0) as usize)
            .take(self.limit.max(0) as usize)
            .collect()
    }
}

/// Extracts a non-null string field from a document body.
fn string_field<'a>(doc: &'a Value, field: &str) -> Option<&'a str> {
    doc.get(field).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn txn(date: &str, category_id: Option<&str>) -> Value {
        let mut doc = json!({ "id": "t1", "date": date, "amount": "10" });
        if let Some(cid) = category_id {
            doc["categoryId"] = json!(cid);
        }
        doc
    }

    #[test]
    fn date_range_is_inclusive_on_both_bounds() {
        let query = DocumentQuery::for_kind(DocumentKind::Transaction)
            .date_between(Some("2017-01-01"), Some("2017-01-31"));

        assert!(query.matches(&txn("2017-01-01", None)));
        assert!(query.matches(&txn("2017-01-31", None)));
        assert!(!query.matches(&txn("2016-12-31", None)));
        assert!(!query.matches(&txn("2017-02-01", None)));
    }

    #[test]
    fn open_bounds_cover_all_dates() {
        let query =
            DocumentQuery::for_kind(DocumentKind::Transaction).date_between(None, None);

        assert!(query.matches(&txn("0001-01-01", None)));
        assert!(query.matches(&txn("2999-12-31", None)));
    }

    #[test]
    fn category_equals_and_absent() {
        let eq = DocumentQuery::for_kind(DocumentKind::Transaction).category(CategoryClause {
            equals: Some("groceries".to_string()),
            ..Default::default()
        });
        assert!(eq.matches(&txn("2017-01-01", Some("groceries"))));
        assert!(!eq.matches(&txn("2017-01-01", Some("rent"))));
        assert!(!eq.matches(&txn("2017-01-01", None)));

        let absent = DocumentQuery::for_kind(DocumentKind::Transaction).category(CategoryClause {
            must_not_exist: true,
            ..Default::default()
        });
        assert!(absent.matches(&txn("2017-01-01", None)));
        assert!(!absent.matches(&txn("2017-01-01", Some("rent"))));
    }

    #[test]
    fn category_not_equals_passes_absent_field() {
        let query = DocumentQuery::for_kind(DocumentKind::Transaction).category(CategoryClause {
            not_equals: Some("internaltransfer".to_string()),
            ..Default::default()
        });

        assert!(query.matches(&txn("2017-01-01", None)));
        assert!(query.matches(&txn("2017-01-01", Some("rent"))));
        assert!(!query.matches(&txn("2017-01-01", Some("internaltransfer"))));
    }

    #[test]
    fn contradictory_clause_matches_nothing() {
        // equals + must_not_exist can never both hold; the composed query is
        // accepted and simply yields no documents.
        let query = DocumentQuery::for_kind(DocumentKind::Transaction).category(CategoryClause {
            equals: Some("groceries".to_string()),
            must_not_exist: true,
            ..Default::default()
        });

        assert!(!query.matches(&txn("2017-01-01", Some("groceries"))));
        assert!(!query.matches(&txn("2017-01-01", None)));
    }

    #[test]
    fn apply_sorts_and_paginates() {
        let docs = vec![
            txn("2017-01-01", None),
            txn("2017-02-01", None),
            txn("2017-01-15", None),
        ];

        let asc = DocumentQuery::for_kind(DocumentKind::Transaction)
            .date_between(None, None)
            .sort_by_date(SortDirection::Asc);
        let dates: Vec<String> = asc
            .apply(docs.clone())
            .iter()
            .map(|d| d["date"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(dates, vec!["2017-01-01", "2017-01-15", "2017-02-01"]);

        let second_page = DocumentQuery::for_kind(DocumentKind::Transaction)
            .date_between(None, None)
            .sort_by_date(SortDirection::Desc)
            .paginate(2, 2);
        let dates: Vec<String> = second_page
            .apply(docs)
            .iter()
            .map(|d| d["date"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(dates, vec!["2017-01-01"]);
    }

    #[test]
    fn count_variant_drops_pagination() {
        let query = DocumentQuery::for_kind(DocumentKind::Transaction)
            .date_between(Some("2017-01-01"), Some("2017-12-31"))
            .paginate(10, 3);
        let count = query.count_variant();

        assert_eq!(count.limit(), MAX_DOCUMENT_COUNT);
        assert_eq!(count.skip(), 0);
        assert_eq!(count.date_range(), query.date_range());
    }
}
