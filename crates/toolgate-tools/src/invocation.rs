//! Typed tool invocations, one variant per built-in tool.

use crate::builtins::utils::parse_args;
use crate::catalog::{DB_QUERY, KB_LOOKUP, TICKET_SEARCH};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use toolgate_protocol::{ToolArguments, ToolError};

/// Arguments for `ticket_search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TicketSearchArgs {
    /// Substring matched against ticket titles.
    pub query: String,
    /// Result cap; the configured default applies when omitted.
    #[serde(default)]
    pub top_k: Option<u64>,
}

/// Arguments for `kb_lookup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KbLookupArgs {
    pub topic: String,
}

/// Arguments for `db_query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DbQueryArgs {
    pub sql: String,
}

/// A validated request for one of the built-in tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInvocation {
    TicketSearch(TicketSearchArgs),
    KbLookup(KbLookupArgs),
    DbQuery(DbQueryArgs),
}

impl ToolInvocation {
    /// Decode `args` into the variant selected by `name`.
    pub fn parse(name: &str, args: &ToolArguments) -> Result<Self, ToolError> {
        let value = Value::Object(args.clone());
        match name {
            TICKET_SEARCH => Ok(Self::TicketSearch(parse_args(value)?)),
            KB_LOOKUP => Ok(Self::KbLookup(parse_args(value)?)),
            DB_QUERY => Ok(Self::DbQuery(parse_args(value)?)),
            other => Err(ToolError::Execution(format!(
                "Tool {other} has no implementation"
            ))),
        }
    }

    /// Catalog name of the selected tool.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TicketSearch(_) => TICKET_SEARCH,
            Self::KbLookup(_) => KB_LOOKUP,
            Self::DbQuery(_) => DB_QUERY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DbQueryArgs, KbLookupArgs, TicketSearchArgs, ToolInvocation};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use toolgate_protocol::{ToolArguments, ToolError};

    fn args(value: Value) -> ToolArguments {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn parses_each_variant() {
        assert_eq!(
            ToolInvocation::parse("ticket_search", &args(json!({ "query": "login" })))
                .expect("search"),
            ToolInvocation::TicketSearch(TicketSearchArgs {
                query: "login".to_string(),
                top_k: None
            })
        );
        assert_eq!(
            ToolInvocation::parse("kb_lookup", &args(json!({ "topic": "mcp" }))).expect("kb"),
            ToolInvocation::KbLookup(KbLookupArgs {
                topic: "mcp".to_string()
            })
        );
        let query = ToolInvocation::parse("db_query", &args(json!({ "sql": "SELECT 1" })))
            .expect("query");
        assert_eq!(query.name(), "db_query");
        assert_eq!(
            query,
            ToolInvocation::DbQuery(DbQueryArgs {
                sql: "SELECT 1".to_string()
            })
        );
    }

    #[test]
    fn negative_top_k_is_a_validation_error() {
        let err = ToolInvocation::parse(
            "ticket_search",
            &args(json!({ "query": "login", "top_k": -1 })),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[test]
    fn unmapped_name_is_an_execution_error() {
        let err = ToolInvocation::parse("mystery", &ToolArguments::new()).unwrap_err();
        assert_eq!(
            err,
            ToolError::Execution("Tool mystery has no implementation".to_string())
        );
    }
}
