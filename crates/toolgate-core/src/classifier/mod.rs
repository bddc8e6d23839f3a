//! Intent classification: free-text query in, tool selection out.

mod heuristic;

pub use heuristic::HeuristicClassifier;

use crate::error::CoreError;
use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;
use toolgate_config::AgentConfig;
use toolgate_protocol::ToolArguments;

/// A tool chosen for a query, with the arguments extracted from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub tool: String,
    pub args: ToolArguments,
}

impl Selection {
    /// Selection with a single string argument.
    pub fn single(tool: &str, key: &str, value: impl Into<String>) -> Self {
        let mut args = ToolArguments::new();
        args.insert(key.to_string(), Value::String(value.into()));
        Self {
            tool: tool.to_string(),
            args,
        }
    }

    /// String argument by key, if present.
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(Value::as_str)
    }
}

/// Outcome of classifying one query.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Selected(Selection),
    NoMatch,
}

/// Swappable classifier capability used by the orchestrator.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &str;

    /// Map a query to a tool selection.
    async fn classify(&self, query: &str) -> Result<Classification, CoreError>;
}

/// Pick the classifier backend for the configured agent mode.
///
/// Model mode needs both a model section in config and a backend instance;
/// otherwise the heuristic classifier is used.
pub fn select_classifier(
    config: &AgentConfig,
    model_backend: Option<Arc<dyn IntentClassifier>>,
) -> Result<Arc<dyn IntentClassifier>, CoreError> {
    if !config.is_heuristic() {
        match (&config.model, model_backend) {
            (Some(model), Some(backend)) => {
                info!(
                    "using model classifier (provider={}, name={})",
                    model.provider, model.name
                );
                return Ok(backend);
            }
            (None, _) => warn!("agent.mode is model but no model is configured; using heuristics"),
            (Some(model), None) => warn!(
                "no backend available for model classifier (provider={}); using heuristics",
                model.provider
            ),
        }
    }
    debug!("using heuristic classifier");
    Ok(Arc::new(HeuristicClassifier::new()?))
}

#[cfg(test)]
mod tests {
    use super::{Classification, IntentClassifier, Selection, select_classifier};
    use crate::error::CoreError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use toolgate_config::{AgentConfig, AgentMode, ModelConfig};

    struct NamedClassifier;

    #[async_trait]
    impl IntentClassifier for NamedClassifier {
        fn name(&self) -> &str {
            "named"
        }

        async fn classify(&self, _query: &str) -> Result<Classification, CoreError> {
            Ok(Classification::NoMatch)
        }
    }

    fn model_config() -> ModelConfig {
        ModelConfig {
            provider: "openai".to_string(),
            name: "gpt-4o-mini".to_string(),
            api_key_env: None,
        }
    }

    #[test]
    fn heuristic_mode_ignores_backend() {
        let config = AgentConfig::default();
        let classifier = select_classifier(&config, Some(Arc::new(NamedClassifier))).expect("ok");
        assert_eq!(classifier.name(), "heuristic");
    }

    #[test]
    fn model_mode_uses_backend_when_configured() {
        let config = AgentConfig {
            mode: AgentMode::Model,
            model: Some(model_config()),
        };
        let classifier = select_classifier(&config, Some(Arc::new(NamedClassifier))).expect("ok");
        assert_eq!(classifier.name(), "named");
    }

    #[test]
    fn model_mode_falls_back_without_backend_or_config() {
        let config = AgentConfig {
            mode: AgentMode::Model,
            model: Some(model_config()),
        };
        assert_eq!(select_classifier(&config, None).expect("ok").name(), "heuristic");

        let config = AgentConfig {
            mode: AgentMode::Model,
            model: None,
        };
        let classifier = select_classifier(&config, Some(Arc::new(NamedClassifier))).expect("ok");
        assert_eq!(classifier.name(), "heuristic");
    }

    #[test]
    fn selection_helpers() {
        let selection = Selection::single("kb_lookup", "topic", "mcp");
        assert_eq!(selection.arg_str("topic"), Some("mcp"));
        assert_eq!(selection.arg_str("missing"), None);
    }
}
