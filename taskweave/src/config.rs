//! Engine configuration: the named constants of the design, exposed as
//! overridable fields. `Default` is the documented behavior.

/// Default maximum number of tasks materialized from one decomposition.
pub const DEFAULT_MAX_TASKS: usize = 3;

/// Default token budget for the planning call.
pub const DEFAULT_PLAN_TOKEN_BUDGET: u32 = 250;

/// Default token budget for each task call.
pub const DEFAULT_TASK_TOKEN_BUDGET: u32 = 250;

/// Default token budget for the synthesis call.
pub const DEFAULT_SYNTHESIS_TOKEN_BUDGET: u32 = 350;

/// Default max characters of each completed dependency's result included as
/// context in a task prompt. Bounds prompt size, not content fidelity.
pub const DEFAULT_CONTEXT_SNIPPET_LEN: usize = 150;

/// Default max characters of each task result included in the synthesis prompt.
pub const DEFAULT_SYNTHESIS_SNIPPET_LEN: usize = 200;

/// Default scheduling-pass cap factor: the executor never makes more than
/// `factor × task count` passes, even if stall detection were to misfire.
pub const DEFAULT_MAX_PASS_FACTOR: usize = 2;

/// Keywords that make the fallback plan pick the implementation-oriented
/// template (matched case-insensitively against the goal).
pub const DEFAULT_CODING_KEYWORDS: [&str; 4] = ["code", "program", "implement", "algorithm"];

/// Tunable constants for one orchestrator instance.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub max_tasks: usize,
    pub plan_token_budget: u32,
    pub task_token_budget: u32,
    pub synthesis_token_budget: u32,
    pub context_snippet_len: usize,
    pub synthesis_snippet_len: usize,
    pub max_pass_factor: usize,
    pub coding_keywords: Vec<String>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_tasks: DEFAULT_MAX_TASKS,
            plan_token_budget: DEFAULT_PLAN_TOKEN_BUDGET,
            task_token_budget: DEFAULT_TASK_TOKEN_BUDGET,
            synthesis_token_budget: DEFAULT_SYNTHESIS_TOKEN_BUDGET,
            context_snippet_len: DEFAULT_CONTEXT_SNIPPET_LEN,
            synthesis_snippet_len: DEFAULT_SYNTHESIS_SNIPPET_LEN,
            max_pass_factor: DEFAULT_MAX_PASS_FACTOR,
            coding_keywords: DEFAULT_CODING_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
