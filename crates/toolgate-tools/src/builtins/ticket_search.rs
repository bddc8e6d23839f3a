//! Built-in tool for searching support tickets by title.

use crate::builtins::utils::rows_to_value;
use crate::catalog::TICKET_SEARCH;
use crate::context::ToolContext;
use crate::invocation::TicketSearchArgs;
use log::{debug, error};
use serde_json::{Value, json};
use toolgate_protocol::{ToolDefinition, ToolError};

const SEARCH_SQL: &str = "SELECT * FROM tickets WHERE title LIKE ? LIMIT ?";

/// Definition advertised for `ticket_search`.
pub fn ticket_search_definition(default_top_k: usize) -> ToolDefinition {
    ToolDefinition::new(
        TICKET_SEARCH,
        "Search support tickets by keyword.",
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search keyword" },
                "top_k": { "type": "integer", "default": default_top_k }
            },
            "required": ["query"]
        }),
        json!({ "type": "array", "items": { "type": "object" } }),
    )
}

pub(super) async fn call(ctx: &ToolContext, args: TicketSearchArgs) -> Result<Value, ToolError> {
    let top_k = args
        .top_k
        .unwrap_or(ctx.services.default_top_k as u64);
    let limit = i64::try_from(top_k).unwrap_or(i64::MAX);
    debug!("searching tickets (query={}, top_k={})", args.query, top_k);
    let rows = ctx
        .services
        .store
        .query_rows(SEARCH_SQL, &[json!(format!("%{}%", args.query)), json!(limit)])
        .await
        .map_err(|err| {
            error!("ticket search failed (error={})", err);
            ToolError::Execution(err.to_string())
        })?;
    Ok(rows_to_value(rows))
}

#[cfg(test)]
mod tests {
    use super::call;
    use crate::builtins::test_support::{context, seeded_services};
    use crate::invocation::TicketSearchArgs;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn args(query: &str, top_k: Option<u64>) -> TicketSearchArgs {
        TicketSearchArgs {
            query: query.to_string(),
            top_k,
        }
    }

    fn titles(value: &Value) -> Vec<String> {
        value
            .as_array()
            .expect("array")
            .iter()
            .map(|row| row["title"].as_str().expect("title").to_string())
            .collect()
    }

    #[tokio::test]
    async fn matches_title_substring() {
        let ctx = context("ticket_search", seeded_services());
        let result = call(&ctx, args("payment", None)).await.expect("result");
        let mut found = titles(&result);
        found.sort();
        assert_eq!(
            found,
            vec!["Duplicate payment charged", "Payment declined for valid card"]
        );
    }

    #[tokio::test]
    async fn caps_results_at_top_k() {
        let ctx = context("ticket_search", seeded_services());
        let result = call(&ctx, args("login", Some(2))).await.expect("result");
        assert_eq!(titles(&result).len(), 2);
        let none = call(&ctx, args("login", Some(0))).await.expect("result");
        assert!(titles(&none).is_empty());
    }

    #[tokio::test]
    async fn default_top_k_comes_from_services() {
        let ctx = context("ticket_search", seeded_services().with_default_top_k(1));
        let result = call(&ctx, args("login", None)).await.expect("result");
        assert_eq!(titles(&result).len(), 1);
    }

    #[tokio::test]
    async fn rows_carry_every_column() {
        let ctx = context("ticket_search", seeded_services());
        let result = call(&ctx, args("CSV", None)).await.expect("result");
        let row = &result[0];
        assert_eq!(row["id"], "T-1005");
        assert_eq!(row["status"], "OPEN");
        assert_eq!(row["priority"], "LOW");
    }
}
