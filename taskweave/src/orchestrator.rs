//! Orchestrator facade: plan, execute, synthesize, report.
//!
//! One instance holds the generator, the registry, and the config; each
//! `execute_goal` call builds a fresh graph and log, so instances are safe to
//! reuse across goals and callers never share mutable run state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::OrchestratorConfig;
use crate::error::OrchestrateError;
use crate::executor;
use crate::graph::Task;
use crate::llm::TextGenerator;
use crate::log::RunLog;
use crate::plan;
use crate::synthesize;
use crate::text::snippet;
use crate::workers::WorkerRegistry;

/// The externally observable artifact of one goal run. Field names are a
/// stable contract for CLI, tests, and embedding applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalReport {
    pub goal: String,
    pub tasks: Vec<Task>,
    pub final_output: String,
    pub execution_log: Vec<String>,
}

/// Task orchestration engine over an injected generator and worker registry.
pub struct Orchestrator {
    llm: Arc<dyn TextGenerator>,
    registry: Arc<WorkerRegistry>,
    config: OrchestratorConfig,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Creates an orchestrator with default configuration. Fails on an empty
    /// registry, which could never round-robin assignees.
    pub fn new(
        llm: Arc<dyn TextGenerator>,
        registry: Arc<WorkerRegistry>,
    ) -> Result<Self, OrchestrateError> {
        Self::with_config(llm, registry, OrchestratorConfig::default())
    }

    /// Creates an orchestrator with explicit configuration.
    pub fn with_config(
        llm: Arc<dyn TextGenerator>,
        registry: Arc<WorkerRegistry>,
        config: OrchestratorConfig,
    ) -> Result<Self, OrchestrateError> {
        if registry.is_empty() {
            return Err(OrchestrateError::EmptyRegistry);
        }
        Ok(Self {
            llm,
            registry,
            config,
        })
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Runs one goal end to end: decompose into a task graph, drain it in
    /// dependency order, synthesize one final answer.
    ///
    /// Parse failures and unsatisfiable dependencies degrade the result but
    /// never fail the call; any generation-backend failure aborts it with a
    /// phase-tagged error and no partial report.
    pub async fn execute_goal(&self, goal: &str) -> Result<GoalReport, OrchestrateError> {
        let mut log = RunLog::new();
        log.push(format!("Starting goal run: {}", snippet(goal, 80)));

        let mut graph = plan::decompose(
            self.llm.as_ref(),
            &self.registry,
            &self.config,
            &mut log,
            goal,
        )
        .await?;

        let results = executor::run_tasks(
            self.llm.as_ref(),
            &self.registry,
            &self.config,
            &mut log,
            &mut graph,
        )
        .await?;

        let final_output = synthesize::synthesize(
            self.llm.as_ref(),
            &self.config,
            &mut log,
            goal,
            &results,
        )
        .await?;
        log.push("Goal run complete");

        Ok(GoalReport {
            goal: goal.to_string(),
            tasks: graph.into_tasks(),
            final_output,
            execution_log: log.into_entries(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockGenerator;

    /// **Scenario**: An empty registry is rejected at construction.
    #[test]
    fn empty_registry_rejected() {
        let llm: Arc<dyn TextGenerator> = Arc::new(MockGenerator::fixed(""));
        let registry = Arc::new(WorkerRegistry::from_profiles(vec![]).unwrap());
        let err = Orchestrator::new(llm, registry).unwrap_err();
        assert!(matches!(err, OrchestrateError::EmptyRegistry));
    }

    /// **Scenario**: The report serializes with exactly the documented field
    /// names.
    #[test]
    fn report_serializes_with_stable_field_names() {
        let report = GoalReport {
            goal: "g".to_string(),
            tasks: vec![],
            final_output: "f".to_string(),
            execution_log: vec!["[00:00:00] x".to_string()],
        };
        let value = serde_json::to_value(&report).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        for key in ["goal", "tasks", "final_output", "execution_log"] {
            assert!(obj.contains_key(key), "missing field {key}");
        }
    }
}
