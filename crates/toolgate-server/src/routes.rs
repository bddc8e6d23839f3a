//! HTTP handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use toolgate_protocol::{
    AgentRunRequest, AgentRunResult, HealthStatus, ToolDefinition, ToolRequest, ToolResponse,
};

/// Body accepted by `POST /tool/{tool_name}`.
#[derive(Debug, Deserialize)]
pub struct ToolCallBody {
    /// Optional; must match the path when present.
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub arguments: Value,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::ok(state.service_name()))
}

pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolDefinition>> {
    Json(state.dispatcher().catalog().list().to_vec())
}

pub async fn run_tool(
    State(state): State<AppState>,
    Path(tool_name): Path<String>,
    body: Result<Json<ToolCallBody>, JsonRejection>,
) -> Result<Json<ToolResponse>, ApiError> {
    let Json(body) = body?;
    if let Some(body_name) = &body.tool_name
        && body_name != &tool_name
    {
        return Err(ApiError::bad_request(format!(
            "tool_name {body_name} does not match path {tool_name}"
        )));
    }
    let arguments = match body.arguments {
        Value::Object(map) => map,
        Value::Null => Default::default(),
        _ => return Err(ApiError::bad_request("arguments must be an object")),
    };
    let request = ToolRequest {
        tool_name,
        arguments,
    };

    // Cancels in-flight retries when the request future is dropped on timeout.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    let response = state
        .dispatcher()
        .invoke(&request, cancel)
        .await
        .inspect_err(|err| warn!("tool request failed (name={}, error={})", request.tool_name, err))?;
    info!(
        "tool {} executed in {:.4}s",
        request.tool_name,
        response.duration_seconds().unwrap_or_default()
    );
    Ok(Json(response))
}

pub async fn run_agent(
    State(state): State<AppState>,
    body: Result<Json<AgentRunRequest>, JsonRejection>,
) -> Result<Json<AgentRunResult>, ApiError> {
    let Json(request) = body?;
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    let result = state
        .orchestrator()
        .run_with_cancel(&request.query, cancel)
        .await?;
    Ok(Json(result))
}
