//! Safe structured extraction: pull a task list out of prose-wrapped text.
//!
//! Generation output is unreliable JSON surrounded by commentary, so strict
//! parsing is wrong here. Instead an ordered list of strategies runs until one
//! succeeds: first embedded array-of-objects substring, first embedded object
//! substring, then the whole input. Every individual parse failure is
//! swallowed; only the overall outcome is reported, and "nothing worked" is an
//! explicit variant rather than a silent nothing, so callers can log it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// First `[ { ... } ]` shaped substring, dot matching newlines, non-greedy.
static ARRAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[\s*\{.*?\}\s*\]").expect("array pattern compiles"));

/// First `{ ... }` shaped substring.
static OBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*?\}").expect("object pattern compiles"));

/// One task descriptor as emitted by the planner LLM. Every field is
/// optional: external structured data is never trusted as well-typed, and the
/// planner fills gaps with deterministic defaults during materialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTaskRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,
}

/// Which strategy produced the parse. Kept in the outcome so the run log can
/// say how the plan was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStrategy {
    /// A JSON array of objects embedded in surrounding prose.
    EmbeddedArray,
    /// A single JSON object embedded in surrounding prose, treated as a
    /// one-task plan.
    EmbeddedObject,
    /// The entire input parsed as JSON (array or object).
    WholeInput,
}

impl std::fmt::Display for ExtractStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmbeddedArray => write!(f, "embedded array"),
            Self::EmbeddedObject => write!(f, "embedded object"),
            Self::WholeInput => write!(f, "whole input"),
        }
    }
}

/// Outcome of plan extraction.
#[derive(Debug)]
pub enum PlanExtraction {
    /// A strategy succeeded; `records` holds the raw task descriptors.
    Parsed {
        strategy: ExtractStrategy,
        records: Vec<RawTaskRecord>,
    },
    /// No strategy produced a structured plan. Not an error: callers fall
    /// back to the default plan.
    NotFound,
}

/// Runs the extraction strategies in order and returns the first success.
pub fn extract_plan(text: &str) -> PlanExtraction {
    let text = text.trim();
    if text.is_empty() {
        return PlanExtraction::NotFound;
    }

    if let Some(m) = ARRAY_RE.find(text) {
        if let Ok(records) = serde_json::from_str::<Vec<RawTaskRecord>>(m.as_str()) {
            return PlanExtraction::Parsed {
                strategy: ExtractStrategy::EmbeddedArray,
                records,
            };
        }
        tracing::debug!(target: "taskweave::plan", "embedded array candidate did not parse");
    }

    if let Some(m) = OBJECT_RE.find(text) {
        if let Ok(record) = serde_json::from_str::<RawTaskRecord>(m.as_str()) {
            return PlanExtraction::Parsed {
                strategy: ExtractStrategy::EmbeddedObject,
                records: vec![record],
            };
        }
        tracing::debug!(target: "taskweave::plan", "embedded object candidate did not parse");
    }

    // Last resort: the whole input. Only an array or an object counts as a
    // usable plan; scalars parse as JSON but carry no tasks.
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Array(items)) => {
            let records: Result<Vec<RawTaskRecord>, _> = items
                .into_iter()
                .map(serde_json::from_value::<RawTaskRecord>)
                .collect();
            match records {
                Ok(records) => PlanExtraction::Parsed {
                    strategy: ExtractStrategy::WholeInput,
                    records,
                },
                Err(_) => PlanExtraction::NotFound,
            }
        }
        Ok(value @ serde_json::Value::Object(_)) => {
            match serde_json::from_value::<RawTaskRecord>(value) {
                Ok(record) => PlanExtraction::Parsed {
                    strategy: ExtractStrategy::WholeInput,
                    records: vec![record],
                },
                Err(_) => PlanExtraction::NotFound,
            }
        }
        _ => PlanExtraction::NotFound,
    }
}
