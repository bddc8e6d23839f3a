//! Deterministic keyword classifier.

use crate::classifier::{Classification, IntentClassifier, Selection};
use crate::error::CoreError;
use async_trait::async_trait;
use log::debug;
use regex::Regex;
use toolgate_tools::{DB_QUERY, KB_LOOKUP, TICKET_SEARCH};

const DEFAULT_KEYWORD: &str = "login";
const DEFAULT_TOPIC: &str = "mcp";
const SELECT: &str = "select";

/// Ordered keyword rules; the first matching rule wins.
///
/// 1. "ticket"/"search" selects `ticket_search`.
/// 2. "explain"/"what is" selects `kb_lookup`.
/// 3. "query"/"select" selects `db_query` when the text contains a SELECT.
#[derive(Debug, Clone)]
pub struct HeuristicClassifier {
    search_pattern: Regex,
    topic_pattern: Regex,
}

impl HeuristicClassifier {
    pub fn new() -> Result<Self, CoreError> {
        Ok(Self {
            search_pattern: compile(r"search.*for\s+(\w+)")?,
            topic_pattern: compile(r"(explain|what is)\s+(\w+)")?,
        })
    }

    /// Synchronous classification used by the async trait method.
    pub fn classify_query(&self, query: &str) -> Classification {
        let lowered = query.to_lowercase();

        if lowered.contains("ticket") || lowered.contains("search") {
            let keyword = self
                .search_pattern
                .captures(&lowered)
                .and_then(|caps| caps.get(1))
                .map_or(DEFAULT_KEYWORD, |m| m.as_str());
            return Classification::Selected(Selection::single(TICKET_SEARCH, "query", keyword));
        }

        if lowered.contains("explain") || lowered.contains("what is") {
            let topic = self
                .topic_pattern
                .captures(&lowered)
                .and_then(|caps| caps.get(2))
                .map_or(DEFAULT_TOPIC, |m| m.as_str());
            return Classification::Selected(Selection::single(KB_LOOKUP, "topic", topic));
        }

        // "query" alone never selects a tool; the SQL text starts at SELECT.
        if lowered.contains(SELECT)
            && let Some(start) = find_ignore_ascii_case(query, SELECT)
        {
            return Classification::Selected(Selection::single(DB_QUERY, "sql", &query[start..]));
        }

        Classification::NoMatch
    }
}

#[async_trait]
impl IntentClassifier for HeuristicClassifier {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn classify(&self, query: &str) -> Result<Classification, CoreError> {
        let classification = self.classify_query(query);
        match &classification {
            Classification::Selected(selection) => {
                debug!("classifier selected tool (tool={})", selection.tool)
            }
            Classification::NoMatch => debug!("classifier found no tool"),
        }
        Ok(classification)
    }
}

fn compile(pattern: &str) -> Result<Regex, CoreError> {
    Regex::new(pattern).map_err(|err| CoreError::Regex(err.to_string()))
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().map(|(idx, _)| idx).find(|&idx| {
        haystack
            .get(idx..idx + needle.len())
            .is_some_and(|window| window.eq_ignore_ascii_case(needle))
    })
}
