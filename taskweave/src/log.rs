//! Run log: append-only, timestamped record of planning, execution, and
//! synthesis milestones.
//!
//! Entries are `[HH:MM:SS] message` strings returned verbatim in the final
//! report; each append also emits a `tracing` event so live runs are visible
//! under `RUST_LOG`. One log per goal run, no rotation (a run is bounded by
//! the task cap).

/// Append-only event log for one goal run.
#[derive(Debug, Default)]
pub struct RunLog {
    entries: Vec<String>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one timestamped entry and mirrors it to `tracing`.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "taskweave::run", "{message}");
        let entry = format!("[{}] {}", chrono::Local::now().format("%H:%M:%S"), message);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
