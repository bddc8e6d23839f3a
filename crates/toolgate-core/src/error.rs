//! Error types for the agent core.

use thiserror::Error;
use toolgate_protocol::ToolError;

/// Errors returned by classification and orchestration.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Dispatcher or tool failure on a path that does not absorb errors.
    #[error(transparent)]
    Tool(#[from] ToolError),
    /// Classifier backend failed.
    #[error("classifier error: {0}")]
    Classifier(String),
    /// Classifier pattern failed to compile.
    #[error("regex error: {0}")]
    Regex(String),
}
