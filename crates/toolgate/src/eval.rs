//! Golden-prompt evaluation harness.
//!
//! Each case is run through the orchestrator in-process and scored on two
//! axes: whether the expected tool appears in the trace, and whether every
//! expected field string appears in the serialized run result.

use anyhow::Context;
use chrono::{DateTime, Local};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use toolgate_core::Orchestrator;
use toolgate_protocol::AgentRunResult;

/// Default location of the golden prompt file, relative to the cwd.
pub const DEFAULT_PROMPTS_PATH: &str = "evals/golden_prompts.json";
/// Default directory receiving report files.
pub const DEFAULT_REPORT_DIR: &str = "evals/reports";

/// One golden prompt with its expectations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoldenCase {
    pub id: String,
    pub prompt: String,
    pub expected_tool: String,
    #[serde(default)]
    pub expected_fields: Vec<String>,
}

/// Scored outcome for a single case.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CaseReport {
    pub id: String,
    pub prompt: String,
    pub success: bool,
    #[serde(flatten)]
    pub outcome: CaseOutcome,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CaseOutcome {
    Scored {
        tool_match: bool,
        content_match: bool,
        actual_tools: Vec<String>,
        response: String,
        duration: f64,
    },
    /// The run itself failed.
    Failed { error: String },
}

/// All case reports from one evaluation pass, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalReport {
    pub cases: Vec<CaseReport>,
}

impl EvalReport {
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|case| case.success).count()
    }

    pub fn failures(&self) -> usize {
        self.total() - self.passed()
    }
}

/// Read golden cases from a JSON array file.
pub fn load_cases(path: impl AsRef<Path>) -> anyhow::Result<Vec<GoldenCase>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read golden prompts {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse golden prompts {}", path.display()))
}

/// Score a finished run against its case.
pub fn score(case: &GoldenCase, result: &AgentRunResult, duration: f64) -> anyhow::Result<CaseReport> {
    let actual_tools: Vec<String> = result
        .tool_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let tool_match = actual_tools.iter().any(|tool| tool == &case.expected_tool);
    let serialized = serde_json::to_string(result).context("failed to serialize run result")?;
    let content_match = case
        .expected_fields
        .iter()
        .all(|field| serialized.contains(field.as_str()));
    Ok(CaseReport {
        id: case.id.clone(),
        prompt: case.prompt.clone(),
        success: tool_match && content_match,
        outcome: CaseOutcome::Scored {
            tool_match,
            content_match,
            actual_tools,
            response: result.answer.clone(),
            duration,
        },
    })
}

/// Run every case sequentially through `orchestrator`.
pub async fn run_cases(
    orchestrator: &Orchestrator,
    cases: &[GoldenCase],
) -> anyhow::Result<EvalReport> {
    info!("running evaluation cases (count={})", cases.len());
    let mut report = EvalReport::default();
    for case in cases {
        let started = Instant::now();
        let case_report = match orchestrator.run(&case.prompt).await {
            Ok(result) => score(case, &result, started.elapsed().as_secs_f64())?,
            Err(err) => {
                warn!("evaluation case errored (id={}, error={})", case.id, err);
                CaseReport {
                    id: case.id.clone(),
                    prompt: case.prompt.clone(),
                    success: false,
                    outcome: CaseOutcome::Failed {
                        error: err.to_string(),
                    },
                }
            }
        };
        report.cases.push(case_report);
    }
    Ok(report)
}

/// Write the case reports as `report_<YYYYmmdd_HHMMSS>.json` under `dir`.
pub fn write_report(
    report: &EvalReport,
    dir: impl AsRef<Path>,
    at: DateTime<Local>,
) -> anyhow::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create report dir {}", dir.display()))?;
    let path = dir.join(format!("report_{}.json", at.format("%Y%m%d_%H%M%S")));
    let body = serde_json::to_string_pretty(&report.cases).context("failed to encode report")?;
    fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
    info!("evaluation report written (path={})", path.display());
    Ok(path)
}
