//! Task executor: dependency-ordered, strictly sequential, guaranteed to
//! terminate.
//!
//! The scheduler is a fixed-point worklist over the graph: full passes in
//! insertion order, executing every pending task whose dependencies are all
//! completed at the moment it is visited (so a linear chain finishes within a
//! single pass). The loop stops when the graph is fully completed, when a
//! full pass executes nothing (stall: some dependency can never be satisfied),
//! or at the `max_pass_factor × task count` cap kept as a secondary bound.
//! A stalled task is left pending with no result and the run proceeds to
//! synthesis: forward progress over completeness.
//!
//! No per-task error recovery: a generation failure aborts the whole run.

use crate::config::OrchestratorConfig;
use crate::error::OrchestrateError;
use crate::graph::{TaskGraph, TaskStatus};
use crate::llm::TextGenerator;
use crate::log::RunLog;
use crate::text::snippet;
use crate::workers::WorkerRegistry;

/// Runs every eligible task in the graph; returns `(task id, result)` pairs
/// in completion order.
pub(crate) async fn run_tasks(
    llm: &dyn TextGenerator,
    registry: &WorkerRegistry,
    config: &OrchestratorConfig,
    log: &mut RunLog,
    graph: &mut TaskGraph,
) -> Result<Vec<(String, String)>, OrchestrateError> {
    let mut results: Vec<(String, String)> = Vec::new();
    let max_passes = graph.len().saturating_mul(config.max_pass_factor);
    let mut pass = 0;

    while !graph.all_completed() && pass < max_passes {
        pass += 1;
        let mut executed = 0usize;

        for index in 0..graph.len() {
            let (id, eligible) = {
                let task = &graph.tasks()[index];
                let eligible =
                    task.status == TaskStatus::Pending && graph.deps_completed(task);
                (task.id.clone(), eligible)
            };
            if !eligible {
                continue;
            }
            let result = execute_task(llm, registry, config, log, graph, &id).await?;
            results.push((id, result));
            executed += 1;
        }

        if executed == 0 {
            log.push(format!(
                "No runnable tasks in pass {pass}; {} task(s) left pending",
                graph.pending_count()
            ));
            break;
        }
    }

    if !graph.all_completed() && pass >= max_passes {
        log.push(format!(
            "Stopping at pass cap ({max_passes}); {} task(s) left pending",
            graph.pending_count()
        ));
    }

    Ok(results)
}

/// Executes one task: worker system prompt, task description, and truncated
/// context from completed dependencies, in one generation call.
async fn execute_task(
    llm: &dyn TextGenerator,
    registry: &WorkerRegistry,
    config: &OrchestratorConfig,
    log: &mut RunLog,
    graph: &mut TaskGraph,
    id: &str,
) -> Result<String, OrchestrateError> {
    let (description, assigned_to, dependencies) = match graph.get(id) {
        Some(task) => (
            task.description.clone(),
            task.assigned_to.clone(),
            task.dependencies.clone(),
        ),
        None => return Ok(String::new()),
    };
    log.push(format!("Executing {id} with {assigned_to}"));
    if let Some(task) = graph.get_mut(id) {
        task.status = TaskStatus::InProgress;
    }

    // Unknown assignee is tolerated: empty prompt contribution.
    let system_prompt = registry
        .get(&assigned_to)
        .map(|w| w.system_prompt.as_str())
        .unwrap_or("");

    let mut context = String::new();
    if !dependencies.is_empty() {
        let mut lines = String::new();
        for dep in &dependencies {
            if let Some(result) = graph.get(dep).and_then(|t| t.result.as_deref()) {
                lines.push_str(&format!(
                    "- {}...\n",
                    snippet(result, config.context_snippet_len)
                ));
            }
        }
        if !lines.is_empty() {
            context = format!("\n\nContext from previous tasks:\n{lines}");
        }
    }

    let prompt = format!(
        "{system_prompt}\n\nTask: {description}{context}\n\nProvide a clear, concise response:"
    );
    let result = llm
        .generate(&prompt, config.task_token_budget)
        .await
        .map_err(|source| OrchestrateError::TaskExecution {
            task_id: id.to_string(),
            source,
        })?;

    if let Some(task) = graph.get_mut(id) {
        task.result = Some(result.clone());
        task.status = TaskStatus::Completed;
    }
    log.push(format!("  completed {id}"));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Task;
    use crate::llm::{FailingGenerator, MockGenerator};

    fn graph_of(tasks: Vec<Task>) -> TaskGraph {
        let mut g = TaskGraph::default();
        for t in tasks {
            g.insert(t);
        }
        g
    }

    fn chain3() -> TaskGraph {
        graph_of(vec![
            Task::new("task_1", "research", "researcher", vec![]),
            Task::new("task_2", "analyze", "analyst", vec!["task_1".into()]),
            Task::new("task_3", "write", "writer", vec!["task_2".into()]),
        ])
    }

    /// **Scenario**: A linear chain completes fully, in order, with results
    /// recorded on each task.
    #[tokio::test]
    async fn linear_chain_completes_in_order() {
        let llm = MockGenerator::fixed("task output");
        let registry = crate::workers::WorkerRegistry::builtin().unwrap();
        let mut log = RunLog::new();
        let mut graph = chain3();
        let results = run_tasks(
            &llm,
            &registry,
            &OrchestratorConfig::default(),
            &mut log,
            &mut graph,
        )
        .await
        .unwrap();
        assert!(graph.all_completed());
        let order: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["task_1", "task_2", "task_3"]);
        assert!(graph.tasks().iter().all(|t| t.result.is_some()));
        // One generation call per task, no retries.
        assert_eq!(llm.calls().len(), 3);
    }

    /// **Scenario**: A task depending on a nonexistent id stays pending with
    /// no result; the rest completes and run_tasks still returns.
    #[tokio::test]
    async fn ghost_dependency_terminates_with_task_pending() {
        let llm = MockGenerator::fixed("output");
        let registry = crate::workers::WorkerRegistry::builtin().unwrap();
        let mut log = RunLog::new();
        let mut graph = graph_of(vec![
            Task::new("task_1", "research", "researcher", vec![]),
            Task::new("task_2", "write", "writer", vec!["ghost".into()]),
        ]);
        let results = run_tasks(
            &llm,
            &registry,
            &OrchestratorConfig::default(),
            &mut log,
            &mut graph,
        )
        .await
        .unwrap();
        assert_eq!(graph.get("task_1").unwrap().status, TaskStatus::Completed);
        let stuck = graph.get("task_2").unwrap();
        assert_eq!(stuck.status, TaskStatus::Pending);
        assert!(stuck.result.is_none());
        assert_eq!(results.len(), 1);
        assert!(log
            .entries()
            .iter()
            .any(|e| e.contains("left pending")));
    }

    /// **Scenario**: Dependency context in the prompt is truncated to the
    /// configured snippet length; the worker system prompt leads the prompt.
    #[tokio::test]
    async fn task_prompt_carries_truncated_context() {
        let long = "x".repeat(400);
        let llm = MockGenerator::with_responses(vec![long.clone(), "final".into()]);
        let registry = crate::workers::WorkerRegistry::builtin().unwrap();
        let mut log = RunLog::new();
        let mut graph = graph_of(vec![
            Task::new("task_1", "research", "researcher", vec![]),
            Task::new("task_2", "write", "writer", vec!["task_1".into()]),
        ]);
        run_tasks(
            &llm,
            &registry,
            &OrchestratorConfig::default(),
            &mut log,
            &mut graph,
        )
        .await
        .unwrap();
        let calls = llm.calls();
        let second_prompt = &calls[1].0;
        assert!(second_prompt.contains("Context from previous tasks:"));
        assert!(second_prompt.contains(&format!("- {}...", "x".repeat(150))));
        assert!(!second_prompt.contains(&"x".repeat(151)));
        assert!(second_prompt.starts_with("You are a professional writer."));
        assert_eq!(calls[1].1, 250);
    }

    /// **Scenario**: An unknown assignee runs with an empty system-prompt
    /// contribution instead of failing.
    #[tokio::test]
    async fn unknown_worker_runs_with_empty_system_prompt() {
        let llm = MockGenerator::fixed("out");
        let registry = crate::workers::WorkerRegistry::builtin().unwrap();
        let mut log = RunLog::new();
        let mut graph = graph_of(vec![Task::new("task_1", "do it", "stranger", vec![])]);
        run_tasks(
            &llm,
            &registry,
            &OrchestratorConfig::default(),
            &mut log,
            &mut graph,
        )
        .await
        .unwrap();
        let prompt = &llm.calls()[0].0;
        assert!(prompt.starts_with("\n\nTask: do it"));
        assert!(graph.all_completed());
    }

    /// **Scenario**: A generation failure aborts the run with the failing
    /// task's id; the task never reaches completed.
    #[tokio::test]
    async fn generation_failure_aborts_run() {
        let llm = FailingGenerator::new("backend down");
        let registry = crate::workers::WorkerRegistry::builtin().unwrap();
        let mut log = RunLog::new();
        let mut graph = graph_of(vec![Task::new("task_1", "d", "researcher", vec![])]);
        let err = run_tasks(
            &llm,
            &registry,
            &OrchestratorConfig::default(),
            &mut log,
            &mut graph,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            OrchestrateError::TaskExecution { ref task_id, .. } if task_id == "task_1"
        ));
        assert!(!graph.all_completed());
    }

    /// **Scenario**: An empty graph returns immediately with no results.
    #[tokio::test]
    async fn empty_graph_is_a_noop() {
        let llm = MockGenerator::fixed("unused");
        let registry = crate::workers::WorkerRegistry::builtin().unwrap();
        let mut log = RunLog::new();
        let mut graph = TaskGraph::default();
        let results = run_tasks(
            &llm,
            &registry,
            &OrchestratorConfig::default(),
            &mut log,
            &mut graph,
        )
        .await
        .unwrap();
        assert!(results.is_empty());
        assert!(llm.calls().is_empty());
    }
}
