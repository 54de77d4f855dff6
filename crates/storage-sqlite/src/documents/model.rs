//! Database model for documents.

use diesel::prelude::*;
use serde_json::Value;

use moneta_core::errors::Result;
use moneta_core::store::DocumentKind;

/// Database row for a stored document.
///
/// The body is the document itself, serialized JSON. `kind` and `date` are
/// copied out of the body at write time so the partition and date-range
/// parts of a query run against indexed columns.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DocumentRow {
    pub id: String,
    pub kind: String,
    pub date: Option<String>,
    pub body: String,
}

impl DocumentRow {
    /// Builds a row from a document body. The body must already carry the
    /// given id in its `id` field.
    pub fn from_body(id: String, kind: DocumentKind, doc: &Value) -> Result<Self> {
        let date = doc.get("date").and_then(Value::as_str).map(str::to_string);
        Ok(Self {
            id,
            kind: kind.as_str().to_string(),
            date,
            body: serde_json::to_string(doc)?,
        })
    }

    /// Parses the stored body back into a document.
    pub fn into_body(self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn date_is_copied_out_of_the_body() {
        let doc = json!({ "id": "t1", "date": "2017-01-05", "name": "RENT" });
        let row = DocumentRow::from_body("t1".to_string(), DocumentKind::Transaction, &doc)
            .unwrap();

        assert_eq!(row.date.as_deref(), Some("2017-01-05"));
        assert_eq!(row.kind, "Transaction");
        assert_eq!(row.into_body().unwrap(), doc);
    }

    #[test]
    fn dateless_documents_store_a_null_date() {
        let doc = json!({ "id": "a1", "name": "Checking" });
        let row = DocumentRow::from_body("a1".to_string(), DocumentKind::Account, &doc).unwrap();

        assert!(row.date.is_none());
    }
}
