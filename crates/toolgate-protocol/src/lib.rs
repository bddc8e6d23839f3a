//! Wire protocol types for Toolgate tool calls, agent runs, and common types.

mod tool;

pub use tool::{StatusClass, ToolError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Argument mapping passed to a tool invocation.
pub type ToolArguments = Map<String, Value>;

/// Metadata key carrying the measured dispatch duration.
pub const DURATION_SECONDS_KEY: &str = "duration_seconds";

/// Version assigned to tool definitions that do not declare one.
pub const DEFAULT_TOOL_VERSION: &str = "1.0.0";

/// Static description of a tool exposed by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// What the tool does.
    pub description: String,
    /// JSON schema for the input arguments.
    pub input_schema: Value,
    /// JSON schema for the output.
    pub output_schema: Value,
    /// Definition version.
    #[serde(default = "default_tool_version")]
    pub version: String,
}

impl ToolDefinition {
    /// Build a definition with the default version.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
        output_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            output_schema,
            version: default_tool_version(),
        }
    }
}

/// A single tool invocation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Name of the tool to execute.
    pub tool_name: String,
    /// Input arguments for the tool.
    #[serde(default)]
    pub arguments: ToolArguments,
}

impl ToolRequest {
    /// Build a request from a name and argument value.
    ///
    /// Non-object argument values produce an empty mapping.
    pub fn new(tool_name: impl Into<String>, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

/// Outcome of a tool invocation as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResponse {
    /// Tool output, `null` on failure.
    pub result: Value,
    /// Error reason if execution failed.
    #[serde(default)]
    pub error: Option<String>,
    /// Metadata such as execution time.
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl ToolResponse {
    /// Successful response with the measured duration.
    pub fn success(result: Value, duration_seconds: f64) -> Self {
        let mut meta = Map::new();
        meta.insert(DURATION_SECONDS_KEY.to_string(), Value::from(duration_seconds));
        Self {
            result,
            error: None,
            meta,
        }
    }

    /// Measured duration, if recorded.
    pub fn duration_seconds(&self) -> Option<f64> {
        self.meta.get(DURATION_SECONDS_KEY).and_then(Value::as_f64)
    }
}

/// Record of a single tool call made during an agent run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallTrace {
    /// Tool name.
    pub tool: String,
    /// Arguments passed to the tool.
    pub args: Value,
    /// Tool output.
    pub result: Value,
}

/// Request body for an agent run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRunRequest {
    /// User query to process.
    pub query: String,
}

/// Answer and ordered tool-call trace for one agent run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AgentRunResult {
    /// Final answer text.
    pub answer: String,
    /// Tool calls made during the run, in order.
    #[serde(default)]
    pub tool_calls: Vec<ToolCallTrace>,
}

impl AgentRunResult {
    /// Names of the tools recorded in the trace.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tool_calls
            .iter()
            .map(|call| call.tool.as_str())
            .collect()
    }
}

/// Liveness payload for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
}

impl HealthStatus {
    /// Healthy status for the named service.
    pub fn ok(service: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.into(),
        }
    }
}

/// Error body returned by the transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable failure reason.
    pub detail: String,
}

fn default_tool_version() -> String {
    DEFAULT_TOOL_VERSION.to_string()
}
