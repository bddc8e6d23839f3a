//! Agent core for Toolgate.
//!
//! This crate owns the intent classifier capability, its keyword heuristic
//! implementation, and the orchestrator that turns a free-text query into a
//! tool call plus a human-readable answer.

pub mod classifier;
pub mod error;
pub mod orchestrator;

/// Classifier capability, heuristic implementation and backend selection.
pub use classifier::{
    Classification, HeuristicClassifier, IntentClassifier, Selection, select_classifier,
};
/// Core error type.
pub use error::CoreError;
/// Orchestrator facade.
pub use orchestrator::{NO_TOOL_ANSWER, Orchestrator};
