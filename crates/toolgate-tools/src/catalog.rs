//! Ordered catalog of tool definitions.

use log::debug;
use toolgate_protocol::{ToolDefinition, ToolError};

/// Ticket search tool name.
pub const TICKET_SEARCH: &str = "ticket_search";
/// Knowledge-base lookup tool name.
pub const KB_LOOKUP: &str = "kb_lookup";
/// Read-only SQL tool name.
pub const DB_QUERY: &str = "db_query";

/// Immutable-after-startup list of tool definitions in registration order.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    definitions: Vec<ToolDefinition>,
}

impl ToolCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition. Names must be unique.
    pub fn register(&mut self, definition: ToolDefinition) -> Result<(), ToolError> {
        if self.contains(&definition.name) {
            return Err(ToolError::Validation(format!(
                "Tool {} already registered",
                definition.name
            )));
        }
        debug!("registering tool (name={})", definition.name);
        self.definitions.push(definition);
        Ok(())
    }

    /// All definitions in registration order.
    pub fn list(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Fetch a definition by name.
    pub fn get(&self, name: &str) -> Result<&ToolDefinition, ToolError> {
        self.definitions
            .iter()
            .find(|definition| definition.name == name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions
            .iter()
            .any(|definition| definition.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.definitions
            .iter()
            .map(|definition| definition.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
