//! Goal planner: one generation call, tolerant extraction, deterministic
//! fallback, and materialization of typed tasks into a graph.

use crate::config::OrchestratorConfig;
use crate::error::OrchestrateError;
use crate::graph::{Task, TaskGraph};
use crate::llm::TextGenerator;
use crate::log::RunLog;
use crate::text::snippet;
use crate::workers::WorkerRegistry;

use super::parser::{extract_plan, PlanExtraction, RawTaskRecord};
use super::prompt::decompose_prompt;

/// Deterministic fallback plan: a pure function of the goal's keyword
/// content. Goals mentioning a coding keyword get the
/// research → implementation → documentation template; everything else gets
/// research → analysis → writing. Always exactly 3 tasks in a strict linear
/// chain, so the fallback can never introduce an unsatisfiable dependency.
pub fn default_plan(goal: &str, config: &OrchestratorConfig) -> Vec<RawTaskRecord> {
    let lower = goal.to_lowercase();
    let coding = config
        .coding_keywords
        .iter()
        .any(|kw| lower.contains(&kw.to_lowercase()));

    let record = |id: &str, description: String, assigned_to: &str, deps: &[&str]| RawTaskRecord {
        id: Some(id.to_string()),
        description: Some(description),
        assigned_to: Some(assigned_to.to_string()),
        dependencies: Some(deps.iter().map(|s| s.to_string()).collect()),
    };

    if coding {
        vec![
            record(
                "task_1",
                format!("Research and explain the concept: {goal}"),
                "researcher",
                &[],
            ),
            record(
                "task_2",
                format!("Write code implementation for: {goal}"),
                "coder",
                &["task_1"],
            ),
            record(
                "task_3",
                "Create documentation and examples".to_string(),
                "writer",
                &["task_2"],
            ),
        ]
    } else {
        vec![
            record("task_1", format!("Research: {goal}"), "researcher", &[]),
            record(
                "task_2",
                "Analyze findings and structure content".to_string(),
                "analyst",
                &["task_1"],
            ),
            record(
                "task_3",
                "Write comprehensive response".to_string(),
                "writer",
                &["task_2"],
            ),
        ]
    }
}

/// Decomposes `goal` into a freshly built task graph.
///
/// One generation call with the plan token budget; parse failure or an empty
/// parsed list falls back to [`default_plan`] and is never surfaced as an
/// error. At most `max_tasks` records are materialized, with deterministic
/// defaults for missing fields: synthesized `task_{n}` ids, a goal-referencing
/// description, round-robin assignees in registry order, and a dependency on
/// the immediately preceding task.
pub(crate) async fn decompose(
    llm: &dyn TextGenerator,
    registry: &WorkerRegistry,
    config: &OrchestratorConfig,
    log: &mut RunLog,
    goal: &str,
) -> Result<TaskGraph, OrchestrateError> {
    log.push(format!("Decomposing goal: {goal}"));
    let prompt = decompose_prompt(goal, registry, config.max_tasks);
    let response = llm
        .generate(&prompt, config.plan_token_budget)
        .await
        .map_err(OrchestrateError::Planning)?;

    let records = match extract_plan(&response) {
        PlanExtraction::Parsed { strategy, records } if !records.is_empty() => {
            log.push(format!(
                "Parsed {} task record(s) from planner output ({strategy})",
                records.len()
            ));
            records
        }
        PlanExtraction::Parsed { .. } => {
            log.push("Planner output parsed to an empty list; using default plan".to_string());
            default_plan(goal, config)
        }
        PlanExtraction::NotFound => {
            log.push("No structured plan found in planner output; using default plan".to_string());
            default_plan(goal, config)
        }
    };

    let worker_ids: Vec<String> = registry.ids().map(|s| s.to_string()).collect();
    let mut graph = TaskGraph::default();
    let mut prev_id: Option<String> = None;

    for (i, record) in records.into_iter().take(config.max_tasks).enumerate() {
        let id = record
            .id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("task_{}", i + 1));
        let description = record
            .description
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("Work on: {goal}"));
        let assigned_to = record
            .assigned_to
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| worker_ids[i % worker_ids.len()].clone());
        let dependencies: Vec<String> = record
            .dependencies
            .unwrap_or_else(|| match &prev_id {
                None => Vec::new(),
                Some(prev) => vec![prev.clone()],
            })
            .into_iter()
            // Invariant: no self-loops, whatever the planner emitted.
            .filter(|dep| dep != &id)
            .collect();

        let task = Task::new(id.clone(), description, assigned_to, dependencies);
        log.push(format!(
            "  task {}: {}... -> {}",
            task.id,
            snippet(&task.description, 50),
            task.assigned_to
        ));
        if graph.insert(task).is_some() {
            tracing::warn!(target: "taskweave::plan", %id, "duplicate task id from planner");
            log.push(format!(
                "Duplicate task id {id} from planner; earlier entry overwritten"
            ));
        }
        prev_id = Some(id);
    }

    Ok(graph)
}
