//! Structural validation of tool arguments against a declared input schema.
//!
//! Only the subset used by tool definitions is understood: an object schema
//! with `properties.<name>.type` and a `required` list.

use serde_json::{Map, Value};
use toolgate_protocol::{ToolArguments, ToolError};

/// Validate `args` against an object-typed `schema`.
///
/// Missing required keys, unknown keys and primitive type mismatches are
/// reported as `ToolError::Validation`.
pub fn validate_arguments(schema: &Value, args: &ToolArguments) -> Result<(), ToolError> {
    let empty = Map::new();
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for key in required.iter().filter_map(Value::as_str) {
            if !args.contains_key(key) {
                return Err(invalid(format!("Missing required argument: {key}")));
            }
        }
    }

    for (key, value) in args {
        let Some(property) = properties.get(key) else {
            return Err(invalid(format!("Unexpected argument: {key}")));
        };
        if let Some(expected) = property.get("type").and_then(Value::as_str)
            && !matches_type(expected, value)
        {
            return Err(invalid(format!("Argument '{key}' must be of type {expected}")));
        }
    }
    Ok(())
}

fn matches_type(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn invalid(message: String) -> ToolError {
    ToolError::Validation(message)
}
