//! Document store contract - kinds, query descriptors, and the store trait.

mod document;
mod query;
mod store_traits;

pub use document::DocumentKind;
pub use query::{CategoryClause, DocumentQuery, SortDirection};
pub use store_traits::DocumentStore;
