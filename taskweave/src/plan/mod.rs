//! Goal planning: tolerant extraction of a task list from generated text,
//! deterministic fallback templates, and materialization into a task graph.

mod parser;
mod planner;
mod prompt;

pub use parser::{extract_plan, ExtractStrategy, PlanExtraction, RawTaskRecord};
pub use planner::default_plan;
pub(crate) use planner::decompose;
pub use prompt::decompose_prompt;
