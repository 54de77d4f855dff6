pub mod model;
pub mod store;

pub use model::DocumentRow;
pub use store::SqliteDocumentStore;
