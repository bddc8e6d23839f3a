//! Orchestrator: classify a query, dispatch the chosen tool, write the answer.

use crate::classifier::{Classification, IntentClassifier, Selection};
use crate::error::CoreError;
use log::{info, warn};
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolgate_protocol::{AgentRunResult, ToolCallTrace};
use toolgate_tools::{DB_QUERY, KB_LOOKUP, TICKET_SEARCH, ToolDispatcher};

/// Answer returned when no tool matches the query.
pub const NO_TOOL_ANSWER: &str = "I couldn't figure out which tool to use.";

/// Runs one agent turn per call. Runs share no mutable state.
#[derive(Clone)]
pub struct Orchestrator {
    dispatcher: ToolDispatcher,
    classifier: Arc<dyn IntentClassifier>,
}

impl Orchestrator {
    pub fn new(dispatcher: ToolDispatcher, classifier: Arc<dyn IntentClassifier>) -> Self {
        Self {
            dispatcher,
            classifier,
        }
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Run a query without an external deadline.
    pub async fn run(&self, query: &str) -> Result<AgentRunResult, CoreError> {
        self.run_with_cancel(query, CancellationToken::new()).await
    }

    /// Run a query; `cancel` aborts tool retries once the caller gives up.
    ///
    /// `db_query` failures become the answer text and are left out of the
    /// trace. Failures of every other tool are returned as errors.
    pub async fn run_with_cancel(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> Result<AgentRunResult, CoreError> {
        let selection = match self.classifier.classify(query).await? {
            Classification::Selected(selection) => selection,
            Classification::NoMatch => {
                info!("agent run finished without a tool");
                return Ok(AgentRunResult {
                    answer: NO_TOOL_ANSWER.to_string(),
                    tool_calls: Vec::new(),
                });
            }
        };

        let outcome = self
            .dispatcher
            .execute_with_cancel(&selection.tool, &selection.args, cancel)
            .await;

        let result = match outcome {
            Ok(result) => result,
            Err(err) if selection.tool == DB_QUERY => {
                warn!("agent query failed (error={})", err);
                return Ok(AgentRunResult {
                    answer: format!("Query failed: {err}"),
                    tool_calls: Vec::new(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let answer = compose_answer(&selection, &result);
        info!("agent run finished (tool={})", selection.tool);
        Ok(AgentRunResult {
            answer,
            tool_calls: vec![ToolCallTrace {
                tool: selection.tool,
                args: Value::Object(selection.args),
                result,
            }],
        })
    }
}

fn compose_answer(selection: &Selection, result: &Value) -> String {
    match selection.tool.as_str() {
        TICKET_SEARCH => {
            let count = result.as_array().map_or(0, Vec::len);
            let keyword = selection.arg_str("query").unwrap_or_default();
            format!("Found {count} tickets related to '{keyword}'.")
        }
        KB_LOOKUP => {
            let topic = selection.arg_str("topic").unwrap_or_default();
            let summary = result
                .get("summary")
                .and_then(Value::as_str)
                .unwrap_or("No info");
            format!("Here is what I found about {topic}: {summary}")
        }
        DB_QUERY => {
            let row_count = result.get("row_count").cloned().unwrap_or(Value::Null);
            format!("Query executed successfully. Returned {row_count} rows.")
        }
        other => format!("Tool {other} executed successfully."),
    }
}
