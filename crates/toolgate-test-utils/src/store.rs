use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use toolgate_store::{DataStore, Row, StoreError};

/// Store returning canned rows and recording every statement it receives.
#[derive(Debug, Default)]
pub struct StubStore {
    rows: Vec<Row>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    /// Statements and parameters seen so far, in order.
    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl DataStore for StubStore {
    async fn query_rows(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, StoreError> {
        self.calls.lock().push((sql.to_string(), params.to_vec()));
        Ok(self.rows.clone())
    }
}

/// Store that fails every statement with a worker error.
#[derive(Debug, Clone)]
pub struct FailingStore {
    message: String,
}

impl FailingStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DataStore for FailingStore {
    async fn query_rows(&self, _sql: &str, _params: &[Value]) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::Worker(self.message.clone()))
    }
}
