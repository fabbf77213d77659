//! Prompt template for goal decomposition.

use crate::workers::WorkerRegistry;

/// Builds the decomposition prompt: the goal, the worker catalog as
/// `(id, expertise)` lines, and an instruction to answer with only a JSON
/// array.
pub fn decompose_prompt(goal: &str, registry: &WorkerRegistry, max_tasks: usize) -> String {
    let worker_lines: Vec<String> = registry
        .iter()
        .map(|w| format!("- {}: {}", w.name, w.expertise))
        .collect();
    format!(
        "Break down this goal into {max_tasks} specific subtasks. \
Assign each to the best worker.\n\n\
Goal: {goal}\n\n\
Available workers:\n{}\n\n\
Respond ONLY with a JSON array.",
        worker_lines.join("\n")
    )
}
