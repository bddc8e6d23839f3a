//! Name-based dispatch: catalog lookup, argument validation, invocation.

use crate::builtins;
use crate::catalog::ToolCatalog;
use crate::context::{ToolContext, ToolServices};
use crate::invocation::ToolInvocation;
use crate::schema::validate_arguments;
use log::{error, info, warn};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use toolgate_protocol::{ToolArguments, ToolError, ToolRequest, ToolResponse};

/// Routes a tool name and arguments to the matching built-in operation.
///
/// The dispatcher is the single place where tool names are checked against
/// the catalog. It never retries; retries live inside individual operations.
#[derive(Clone, Debug)]
pub struct ToolDispatcher {
    catalog: Arc<ToolCatalog>,
    services: Arc<ToolServices>,
}

impl ToolDispatcher {
    pub fn new(catalog: ToolCatalog, services: ToolServices) -> Self {
        Self {
            catalog: Arc::new(catalog),
            services: Arc::new(services),
        }
    }

    /// Catalog backing this dispatcher.
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Execute a tool without an external deadline.
    pub async fn execute(&self, name: &str, args: &ToolArguments) -> Result<Value, ToolError> {
        self.execute_with_cancel(name, args, CancellationToken::new())
            .await
    }

    /// Execute a tool, aborting retries once `cancel` fires.
    pub async fn execute_with_cancel(
        &self,
        name: &str,
        args: &ToolArguments,
        cancel: CancellationToken,
    ) -> Result<Value, ToolError> {
        let definition = self.catalog.get(name).inspect_err(|_| {
            warn!("unknown tool requested (name={})", name);
        })?;
        validate_arguments(&definition.input_schema, args).inspect_err(|err| {
            warn!("tool arguments rejected (name={}, error={})", name, err);
        })?;
        let invocation = ToolInvocation::parse(name, args).inspect_err(|err| {
            warn!("tool arguments rejected (name={}, error={})", name, err);
        })?;

        info!("executing tool (name={})", name);
        let started = Instant::now();
        let ctx = ToolContext::new(name, self.services.clone(), cancel);
        let result = builtins::run(&ctx, invocation).await;
        let duration_ms = started.elapsed().as_millis();
        match &result {
            Ok(_) => info!("tool executed (name={}, duration_ms={})", name, duration_ms),
            Err(err @ ToolError::Validation(_)) => warn!(
                "tool input validation error (name={}, error={})",
                name, err
            ),
            Err(err) => error!("tool execution error (name={}, error={})", name, err),
        }
        result
    }

    /// Execute a request and wrap the output with its measured duration.
    pub async fn invoke(
        &self,
        request: &ToolRequest,
        cancel: CancellationToken,
    ) -> Result<ToolResponse, ToolError> {
        let started = Instant::now();
        let result = self
            .execute_with_cancel(&request.tool_name, &request.arguments, cancel)
            .await?;
        Ok(ToolResponse::success(
            result,
            started.elapsed().as_secs_f64(),
        ))
    }
}
