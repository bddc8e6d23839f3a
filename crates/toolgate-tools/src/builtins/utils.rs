//! Utility helpers shared by built-in tools.

use serde::de::DeserializeOwned;
use serde_json::Value;
use toolgate_protocol::ToolError;
use toolgate_store::Row;

/// Parse JSON args into a typed struct for tool calls.
pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|err| ToolError::Validation(err.to_string()))
}

/// Convert store rows into a JSON array.
pub(super) fn rows_to_value(rows: Vec<Row>) -> Value {
    Value::Array(rows.into_iter().map(Value::Object).collect())
}
