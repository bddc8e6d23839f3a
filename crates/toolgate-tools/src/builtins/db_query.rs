//! Built-in tool running caller-supplied read-only SQL.

use crate::builtins::utils::rows_to_value;
use crate::catalog::DB_QUERY;
use crate::context::ToolContext;
use crate::invocation::DbQueryArgs;
use crate::sql_guard::is_safe_select;
use log::{error, warn};
use serde_json::{Value, json};
use toolgate_protocol::{ToolDefinition, ToolError};

/// Definition advertised for `db_query`.
pub fn db_query_definition() -> ToolDefinition {
    ToolDefinition::new(
        DB_QUERY,
        "Run a safe SQL query against the database.",
        json!({
            "type": "object",
            "properties": {
                "sql": { "type": "string" }
            },
            "required": ["sql"]
        }),
        json!({ "type": "object" }),
    )
}

// Safety rejections and runtime store failures are both caller-facing
// validation errors (400-class).
pub(super) async fn call(ctx: &ToolContext, args: DbQueryArgs) -> Result<Value, ToolError> {
    if let Err(rejection) = is_safe_select(&args.sql) {
        warn!("rejected sql (reason={})", rejection);
        return Err(ToolError::Validation(rejection.message()));
    }
    let rows = ctx
        .services
        .store
        .query_rows(&args.sql, &[])
        .await
        .map_err(|err| {
            error!("sql error (error={})", err);
            ToolError::Validation(format!("Database error: {err}"))
        })?;
    let row_count = rows.len();
    Ok(json!({
        "rows": rows_to_value(rows),
        "row_count": row_count
    }))
}
