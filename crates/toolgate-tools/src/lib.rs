//! Tool catalog, safety gates and dispatch for Toolgate.

pub mod builtins;
pub mod catalog;
pub mod context;
pub mod dispatcher;
pub mod invocation;
pub mod knowledge;
pub mod retry;
pub mod schema;
pub mod sql_guard;

/// Built-in tool definitions and registration helper.
pub use builtins::{builtin_catalog, register_builtin_tools};
/// Ordered tool catalog and builtin tool names.
pub use catalog::{DB_QUERY, KB_LOOKUP, TICKET_SEARCH, ToolCatalog};
/// Tool execution context and shared services.
pub use context::{ToolContext, ToolServices};
/// Name-based dispatcher.
pub use dispatcher::ToolDispatcher;
/// Typed tool invocations.
pub use invocation::{DbQueryArgs, KbLookupArgs, TicketSearchArgs, ToolInvocation};
/// Knowledge base types.
pub use knowledge::{KnowledgeBase, KnowledgeEntry};
/// Retry policy and sleeping primitive.
pub use retry::{RetryError, RetryPolicy, Sleeper, TokioSleeper};
/// SQL safety filter.
pub use sql_guard::{FORBIDDEN_KEYWORDS, SqlRejection, is_safe_select};
