//! Built-in tools bundled with Toolgate.

mod db_query;
mod kb_lookup;
mod ticket_search;
pub(crate) mod utils;

use crate::catalog::ToolCatalog;
use crate::context::ToolContext;
use crate::invocation::ToolInvocation;
use log::{debug, info};
use serde_json::Value;
use toolgate_protocol::ToolError;

pub use db_query::db_query_definition;
pub use kb_lookup::kb_lookup_definition;
pub use ticket_search::ticket_search_definition;

/// Register all built-in tool definitions, in listing order.
pub fn register_builtin_tools(
    catalog: &mut ToolCatalog,
    default_top_k: usize,
) -> Result<(), ToolError> {
    catalog.register(ticket_search_definition(default_top_k))?;
    catalog.register(kb_lookup_definition())?;
    catalog.register(db_query_definition())?;
    info!("registered built-in tools (count={})", catalog.len());
    Ok(())
}

/// Build a catalog pre-populated with built-in tools.
pub fn builtin_catalog(default_top_k: usize) -> Result<ToolCatalog, ToolError> {
    let mut catalog = ToolCatalog::new();
    register_builtin_tools(&mut catalog, default_top_k)?;
    Ok(catalog)
}

/// Run a typed invocation.
pub(crate) async fn run(ctx: &ToolContext, invocation: ToolInvocation) -> Result<Value, ToolError> {
    if invocation.name() != ctx.tool_name {
        return Err(ToolError::Execution(format!(
            "Invocation {} does not match tool {}",
            invocation.name(),
            ctx.tool_name
        )));
    }
    debug!("running built-in tool (name={})", ctx.tool_name);
    match invocation {
        ToolInvocation::TicketSearch(args) => ticket_search::call(ctx, args).await,
        ToolInvocation::KbLookup(args) => kb_lookup::call(ctx, args).await,
        ToolInvocation::DbQuery(args) => db_query::call(ctx, args).await,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{context, seeded_services};
    use super::{builtin_catalog, run};
    use crate::invocation::{KbLookupArgs, ToolInvocation};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use toolgate_protocol::ToolError;

    #[tokio::test]
    async fn invocation_must_match_context_tool() {
        let ctx = context("db_query", seeded_services());
        let invocation = ToolInvocation::KbLookup(KbLookupArgs {
            topic: "mcp".to_string(),
        });
        let err = run(&ctx, invocation).await.unwrap_err();
        assert_eq!(
            err,
            ToolError::Execution("Invocation kb_lookup does not match tool db_query".to_string())
        );
    }

    #[test]
    fn builtin_catalog_lists_tools_in_order() {
        let catalog = builtin_catalog(5).expect("catalog");
        assert_eq!(catalog.names(), vec!["ticket_search", "kb_lookup", "db_query"]);
        let search = catalog.get("ticket_search").expect("search");
        assert_eq!(search.input_schema["required"], json!(["query"]));
        assert_eq!(search.input_schema["properties"]["top_k"]["default"], json!(5));
        assert_eq!(search.version, "1.0.0");
    }

    #[test]
    fn default_top_k_flows_into_schema() {
        let catalog = builtin_catalog(9).expect("catalog");
        let search = catalog.get("ticket_search").expect("search");
        assert_eq!(search.input_schema["properties"]["top_k"]["default"], json!(9));
    }
}
