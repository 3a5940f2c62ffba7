//! Local key/value persistence for learner progress.

pub mod error;
pub mod memory;
pub mod repository;
pub mod schema;

pub use error::DbError;
pub use memory::MemoryStore;
pub use repository::{keys, KeyValueStore, SqliteStore};
