//! Repository Layer
//!
//! Data access abstractions and implementations.

mod catalog_file;
mod db;
mod json_store;
mod memory_store;
mod sqlite_store;
mod traits;

#[cfg(test)]
mod tests;

pub use catalog_file::load_catalog;
pub use db::{init_db, DbConn};
pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use sqlite_store::{SqliteStore, SNAPSHOT_KEY};
pub use traits::SnapshotStore;
