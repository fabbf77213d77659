//! Task graph: tasks with dependency edges, statuses, and results.
//!
//! Built by the planner, mutated in place by the executor (status and result
//! fields only; no tasks are added or removed after planning), and handed to
//! the caller inside the final report. One graph per goal run.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Execution status of one task. Transitions only move forward
/// (`Pending → InProgress → Completed`); there is no failed terminal state —
/// a generation failure aborts the whole run instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet executed. Tasks whose dependencies never complete stay here.
    Pending,
    /// Currently executing.
    InProgress,
    /// Executed; `Task::result` is set.
    Completed,
}

/// One unit of work: assignee, dependencies, and eventual result.
///
/// Produced by the planner from raw plan records. `assigned_to` should name a
/// registry worker, but an unknown id is tolerated (the worker's prompt
/// contribution is then empty). `dependencies` never contains the task's own
/// id; the planner strips self-loops during materialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    pub assigned_to: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub result: Option<String>,
}

impl Task {
    /// New pending task with no result.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        assigned_to: impl Into<String>,
        dependencies: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            assigned_to: assigned_to.into(),
            status: TaskStatus::Pending,
            dependencies,
            result: None,
        }
    }
}

/// Insertion-ordered set of tasks keyed by id.
///
/// Small and flat by construction: the planner caps it at `max_tasks` and the
/// default plan is a 3-task chain. The executor walks it in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    tasks: Vec<Task>,
}

impl TaskGraph {
    /// Inserts a task. A duplicate id replaces the earlier entry in place
    /// (last-write-wins, position kept) and the replaced task is returned so
    /// the caller can surface the overwrite in the run log.
    pub fn insert(&mut self, task: Task) -> Option<Task> {
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            return Some(std::mem::replace(existing, task));
        }
        self.tasks.push(task);
        None
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn all_completed(&self) -> bool {
        self.tasks.iter().all(|t| t.status == TaskStatus::Completed)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Completed)
            .count()
    }

    /// True when every dependency of `task` is completed. A dependency id
    /// absent from the graph can never complete, so it keeps the task
    /// ineligible forever; the executor's stall detection handles that.
    pub fn deps_completed(&self, task: &Task) -> bool {
        let completed: HashSet<&str> = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .map(|t| t.id.as_str())
            .collect();
        task.dependencies
            .iter()
            .all(|dep| completed.contains(dep.as_str()))
    }

    /// Ids of pending tasks whose dependencies are all completed, in
    /// insertion order.
    pub fn ready_ids(&self) -> Vec<String> {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Pending && self.deps_completed(t))
            .map(|t| t.id.clone())
            .collect()
    }
}
