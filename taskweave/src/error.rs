//! Engine error type: one variant per phase so a fatal generation failure
//! names the phase it aborted.
//!
//! Parse failures and unsatisfiable dependencies are *not* errors: the planner
//! falls back to the default plan and the executor leaves such tasks pending.
//! Only generation-backend failures (and construction misuse) surface here.

use crate::llm::GenerationError;

/// Error from one goal run. Any generation failure aborts the whole run; no
/// partial report is returned.
#[derive(Debug, thiserror::Error)]
pub enum OrchestrateError {
    /// The generation call made while decomposing the goal failed.
    #[error("planning failed: {0}")]
    Planning(#[source] GenerationError),

    /// The generation call for one task failed.
    #[error("execution of task {task_id} failed: {source}")]
    TaskExecution {
        task_id: String,
        #[source]
        source: GenerationError,
    },

    /// The final synthesis call failed.
    #[error("synthesis failed: {0}")]
    Synthesis(#[source] GenerationError),

    /// The orchestrator was constructed with a registry holding no workers;
    /// round-robin assignment needs at least one.
    #[error("worker registry is empty")]
    EmptyRegistry,
}
