//! # Taskweave
//!
//! A small task-orchestration engine: decompose a natural-language goal into a
//! handful of interdependent subtasks, route each to a specialized worker
//! profile, execute them sequentially in dependency order, and synthesize the
//! results into one final answer.
//!
//! ## Design principles
//!
//! - **One graph per run**: [`Orchestrator::execute_goal`] builds a fresh
//!   [`TaskGraph`] and [`RunLog`] every call; no mutable state is shared
//!   across runs or callers.
//! - **Tolerant planning**: generation output is unreliable prose-wrapped
//!   JSON. [`extract_plan`] tries an ordered list of strategies and the
//!   planner falls back to a deterministic [`default_plan`] when none works;
//!   planning never fails the run.
//! - **Termination over completeness**: the executor is a fixed-point
//!   worklist. A task whose dependency can never complete is left pending and
//!   the run still reaches synthesis.
//! - **Injected capabilities**: the generation backend ([`TextGenerator`]) and
//!   the [`WorkerRegistry`] are constructor arguments, so tests and embedders
//!   swap them freely.
//!
//! ## Main modules
//!
//! - [`orchestrator`]: [`Orchestrator`], [`GoalReport`] — run a goal end to end.
//! - [`plan`]: [`extract_plan`], [`default_plan`], prompt building.
//! - [`graph`]: [`Task`], [`TaskStatus`], [`TaskGraph`].
//! - [`executor`], [`synthesize`]: dependency-ordered execution and the final
//!   combine step.
//! - [`workers`]: [`WorkerProfile`], [`WorkerRegistry`] (built-in YAML catalog).
//! - [`llm`]: [`TextGenerator`] trait, [`MockGenerator`], [`OpenAiGenerator`].
//! - [`log`]: [`RunLog`] timestamped run log.
//! - [`config`]: [`OrchestratorConfig`] named constants.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use taskweave::{MockGenerator, Orchestrator, WorkerRegistry};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(MockGenerator::fixed("some generated text"));
//! let registry = Arc::new(WorkerRegistry::builtin()?);
//! let orchestrator = Orchestrator::new(llm, registry)?;
//!
//! let report = orchestrator.execute_goal("Summarize the history of tea").await?;
//! println!("{}", report.final_output);
//! for line in &report.execution_log {
//!     eprintln!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod graph;
pub mod llm;
pub mod log;
pub mod orchestrator;
pub mod plan;
pub mod synthesize;
pub mod text;
pub mod workers;

pub use config::OrchestratorConfig;
pub use error::OrchestrateError;
pub use graph::{Task, TaskGraph, TaskStatus};
pub use llm::{
    FailingGenerator, GenerationError, MockGenerator, OpenAiGenerator, TextGenerator,
};
pub use log::RunLog;
pub use orchestrator::{GoalReport, Orchestrator};
pub use plan::{default_plan, extract_plan, ExtractStrategy, PlanExtraction, RawTaskRecord};
pub use workers::{RegistryError, WorkerProfile, WorkerRegistry};
