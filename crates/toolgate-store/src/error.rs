//! Error types for store operations.

/// Errors returned by data store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// SQLite error.
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Statement would modify the database.
    #[error("statement is not read-only: {0}")]
    NotReadOnly(String),
    /// More than one statement in a single query.
    #[error("You can only execute one statement at a time.")]
    MultipleStatements,
    /// Query text holds no statement.
    #[error("query contains no statement")]
    EmptyStatement,
    /// Parameter type cannot be bound.
    #[error("unsupported parameter at index {index}: {message}")]
    UnsupportedParam { index: usize, message: String },
    /// Blocking worker failed.
    #[error("store worker failed: {0}")]
    Worker(String),
}
