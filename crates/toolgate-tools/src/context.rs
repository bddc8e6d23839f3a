//! Tool execution context and shared services.

use crate::knowledge::KnowledgeBase;
use crate::retry::RetryPolicy;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolgate_store::DataStore;

/// Default ticket search result cap.
pub const DEFAULT_TOP_K: usize = 5;

/// Collaborators shared by every tool call (constructed once, shared via Arc).
pub struct ToolServices {
    /// Read path for ticket search and SQL queries.
    pub store: Arc<dyn DataStore>,
    /// Knowledge table used by `kb_lookup`.
    pub knowledge: Arc<KnowledgeBase>,
    /// Retry policy wrapping flaky operations.
    pub retry: RetryPolicy,
    /// Result cap used when a search omits `top_k`.
    pub default_top_k: usize,
}

impl ToolServices {
    /// Services over `store` with the bundled knowledge base and default retry policy.
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self {
            store,
            knowledge: Arc::new(KnowledgeBase::builtin()),
            retry: RetryPolicy::default(),
            default_top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeBase) -> Self {
        self.knowledge = Arc::new(knowledge);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_default_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }
}

impl std::fmt::Debug for ToolServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolServices")
            .field("knowledge", &self.knowledge)
            .field("retry", &self.retry)
            .field("default_top_k", &self.default_top_k)
            .finish()
    }
}

/// Per-invocation context handed to a tool operation.
///
/// Cloning is cheap: services live behind an `Arc` and the cancellation
/// token is reference counted.
#[derive(Clone, Debug)]
pub struct ToolContext {
    /// Tool name for the current invocation.
    pub tool_name: String,
    /// Fires when the caller's deadline expires.
    pub cancel: CancellationToken,
    /// Shared services.
    pub services: Arc<ToolServices>,
}

impl ToolContext {
    pub fn new(
        tool_name: impl Into<String>,
        services: Arc<ToolServices>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            cancel,
            services,
        }
    }
}
