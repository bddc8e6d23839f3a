//! Data store collaborator for Toolgate tools.

pub mod error;
pub mod model;
pub mod sqlite;
pub mod store;

/// Store error type.
pub use error::StoreError;
/// Row model and parameter conversion.
pub use model::Row;
/// SQLite implementation and bundled seed.
pub use sqlite::{DEFAULT_SEED_SQL, SqliteStore};
/// Store interface.
pub use store::DataStore;
