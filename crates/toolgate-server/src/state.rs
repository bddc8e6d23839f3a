//! Shared handler state.

use std::sync::Arc;
use toolgate_core::Orchestrator;
use toolgate_tools::ToolDispatcher;

/// Default service name reported by `/health`.
pub const SERVICE_NAME: &str = "toolgate";

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Orchestrator,
    service_name: Arc<str>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            service_name: Arc::from(SERVICE_NAME),
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        self.orchestrator.dispatcher()
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}
