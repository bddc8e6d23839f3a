/// Errors returned by the dispatcher and tool operations.
///
/// Every variant carries a human-readable reason that is surfaced verbatim to
/// callers at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// Tool name is not present in the catalog.
    #[error("Tool {0} not found")]
    NotFound(String),
    /// Arguments were malformed or rejected as unsafe. Never retried.
    #[error("{0}")]
    Validation(String),
    /// Backend or transient failure inside a tool operation.
    #[error("{0}")]
    Execution(String),
}

/// Caller-visible status class for an error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 404-class response.
    NotFound,
    /// 400-class response.
    BadRequest,
    /// 500-class response.
    Internal,
}

impl StatusClass {
    /// Representative HTTP status code for the class.
    pub fn code(self) -> u16 {
        match self {
            StatusClass::NotFound => 404,
            StatusClass::BadRequest => 400,
            StatusClass::Internal => 500,
        }
    }
}

impl ToolError {
    /// Map the error kind to the status class exposed by the transport.
    pub fn status_class(&self) -> StatusClass {
        match self {
            ToolError::NotFound(_) => StatusClass::NotFound,
            ToolError::Validation(_) => StatusClass::BadRequest,
            ToolError::Execution(_) => StatusClass::Internal,
        }
    }

    /// Reason string without the kind prefix.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}
