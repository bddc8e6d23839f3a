//! Built-in tool for knowledge-base lookups, retried on transient failure.

use crate::catalog::KB_LOOKUP;
use crate::context::ToolContext;
use crate::invocation::KbLookupArgs;
use crate::retry::RetryError;
use log::{error, info};
use serde_json::{Value, json};
use toolgate_protocol::{ToolDefinition, ToolError};

/// Definition advertised for `kb_lookup`.
pub fn kb_lookup_definition() -> ToolDefinition {
    ToolDefinition::new(
        KB_LOOKUP,
        "Look up information in the knowledge base.",
        json!({
            "type": "object",
            "properties": {
                "topic": { "type": "string" }
            },
            "required": ["topic"]
        }),
        json!({ "type": "object" }),
    )
}

pub(super) async fn call(ctx: &ToolContext, args: KbLookupArgs) -> Result<Value, ToolError> {
    let knowledge = ctx.services.knowledge.clone();
    let topic = args.topic;
    let outcome = ctx
        .services
        .retry
        .run(&ctx.cancel, |_| {
            let knowledge = knowledge.clone();
            let topic = topic.clone();
            async move { knowledge.lookup(&topic) }
        })
        .await;

    match outcome {
        Ok(entry) => {
            info!("knowledge lookup succeeded (topic={})", topic);
            serde_json::to_value(entry).map_err(|err| ToolError::Execution(err.to_string()))
        }
        Err(err @ RetryError::Exhausted { .. }) => {
            error!(
                "knowledge lookup exhausted retries (topic={}, attempts={})",
                topic,
                err.attempts()
            );
            Err(ToolError::Execution(err.into_last()))
        }
        Err(RetryError::Cancelled { attempts, last }) => {
            error!(
                "knowledge lookup cancelled (topic={}, attempts={})",
                topic, attempts
            );
            Err(ToolError::Execution(format!(
                "{last} (cancelled after {attempts} attempts)"
            )))
        }
    }
}
