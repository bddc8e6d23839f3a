//! Read-path interface used by tools.

use crate::error::StoreError;
use crate::model::Row;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
/// Read-only statement execution against the backing store.
pub trait DataStore: Send + Sync {
    /// Run a single read-only statement with positional parameters.
    async fn query_rows(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, StoreError>;
}
