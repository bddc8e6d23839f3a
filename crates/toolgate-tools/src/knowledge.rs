//! Fixed knowledge table with an injectable failure probability.

use log::warn;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Failure text produced by an injected lookup fault.
pub const UNAVAILABLE_MESSAGE: &str = "KB Service temporarily unavailable";
/// Summary returned for topics that are not in the table.
pub const NO_INFORMATION: &str = "No information found.";

/// One knowledge record as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub topic: String,
    pub summary: String,
    pub sources: Vec<String>,
}

impl KnowledgeEntry {
    pub fn new(topic: &str, summary: &str, sources: &[&str]) -> Self {
        Self {
            topic: topic.to_string(),
            summary: summary.to_string(),
            sources: sources.iter().map(ToString::to_string).collect(),
        }
    }

    /// Record returned for an unknown topic, echoing the topic as given.
    pub fn not_found(topic: &str) -> Self {
        Self::new(topic, NO_INFORMATION, &[])
    }
}

/// In-memory knowledge base keyed by lower-cased topic.
pub struct KnowledgeBase {
    entries: HashMap<String, KnowledgeEntry>,
    failure_rate: f64,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for KnowledgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeBase")
            .field("topics", &self.entries.len())
            .field("failure_rate", &self.failure_rate)
            .finish()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    /// Create an empty knowledge base that never fails.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            failure_rate: 0.0,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Knowledge base holding the bundled `mcp` and `python` entries.
    pub fn builtin() -> Self {
        Self::new()
            .with_entry(KnowledgeEntry::new(
                "mcp",
                "Model Context Protocol (MCP) is a standard for connecting AI models to external tools and data.",
                &["https://mcp.io", "internal-wiki/mcp"],
            ))
            .with_entry(KnowledgeEntry::new(
                "python",
                "Python is a high-level, general-purpose programming language.",
                &["https://python.org"],
            ))
    }

    /// Add or replace an entry.
    pub fn with_entry(mut self, entry: KnowledgeEntry) -> Self {
        self.entries.insert(entry.topic.to_lowercase(), entry);
        self
    }

    /// Probability in `[0.0, 1.0]` that a single lookup attempt fails.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Use a deterministic RNG for injected faults.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    /// Single lookup attempt. Unknown topics succeed with a "no information" record.
    pub fn lookup(&self, topic: &str) -> Result<KnowledgeEntry, String> {
        if self.failure_rate > 0.0 && self.rng.lock().random::<f64>() < self.failure_rate {
            warn!("injected knowledge base failure (topic={})", topic);
            return Err(UNAVAILABLE_MESSAGE.to_string());
        }
        Ok(self
            .entries
            .get(&topic.to_lowercase())
            .cloned()
            .unwrap_or_else(|| KnowledgeEntry::not_found(topic)))
    }
}

#[cfg(test)]
mod tests {
    use super::{KnowledgeBase, KnowledgeEntry, NO_INFORMATION, UNAVAILABLE_MESSAGE};
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_is_case_insensitive() {
        let kb = KnowledgeBase::builtin();
        let entry = kb.lookup("MCP").expect("entry");
        assert_eq!(entry.topic, "mcp");
        assert_eq!(entry.sources, vec!["https://mcp.io", "internal-wiki/mcp"]);
    }

    #[test]
    fn unknown_topic_echoes_input() {
        let kb = KnowledgeBase::builtin();
        let entry = kb.lookup("Rust").expect("entry");
        assert_eq!(entry, KnowledgeEntry::new("Rust", NO_INFORMATION, &[]));
    }

    #[test]
    fn failure_rate_bounds_are_deterministic() {
        let always = KnowledgeBase::builtin().with_failure_rate(1.0).with_seed(7);
        for _ in 0..20 {
            assert_eq!(always.lookup("mcp"), Err(UNAVAILABLE_MESSAGE.to_string()));
        }
        let never = KnowledgeBase::builtin().with_failure_rate(0.0).with_seed(7);
        for _ in 0..20 {
            assert!(never.lookup("python").is_ok());
        }
    }

    #[test]
    fn failure_rate_is_clamped() {
        assert_eq!(KnowledgeBase::new().with_failure_rate(4.0).failure_rate(), 1.0);
        assert_eq!(KnowledgeBase::new().with_failure_rate(-1.0).failure_rate(), 0.0);
    }
}
