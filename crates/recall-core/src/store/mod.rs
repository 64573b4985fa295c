//! Store implementations.

mod sqlite;

pub use sqlite::SqliteItemStore;
