//! Result synthesis: fold every task result into one final answer.
//!
//! One prompt, one generation call, returned verbatim. No retries; a backend
//! failure here aborts the run like any other generation failure. Stalled
//! tasks contribute nothing, so synthesis may run on a subset of results.

use crate::config::OrchestratorConfig;
use crate::error::OrchestrateError;
use crate::llm::TextGenerator;
use crate::log::RunLog;
use crate::text::snippet;

/// Builds the synthesis prompt: the goal plus each task id with its result
/// truncated to the synthesis snippet length.
fn synthesis_prompt(goal: &str, results: &[(String, String)], snippet_len: usize) -> String {
    let results_text: Vec<String> = results
        .iter()
        .map(|(id, result)| format!("Task {id}:\n{}", snippet(result, snippet_len)))
        .collect();
    format!(
        "Combine these task results into one final coherent answer.\n\n\
Original Goal: {goal}\n\n\
Task Results:\n{}\n\n\
Final comprehensive answer:",
        results_text.join("\n\n")
    )
}

/// Asks the generator for one combined answer over all task results.
pub(crate) async fn synthesize(
    llm: &dyn TextGenerator,
    config: &OrchestratorConfig,
    log: &mut RunLog,
    goal: &str,
    results: &[(String, String)],
) -> Result<String, OrchestrateError> {
    log.push("Synthesizing final results");
    let prompt = synthesis_prompt(goal, results, config.synthesis_snippet_len);
    llm.generate(&prompt, config.synthesis_token_budget)
        .await
        .map_err(OrchestrateError::Synthesis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{FailingGenerator, MockGenerator};

    /// **Scenario**: The prompt carries the goal and every task result,
    /// truncated to the snippet length.
    #[test]
    fn prompt_truncates_each_result() {
        let results = vec![
            ("task_1".to_string(), "y".repeat(300)),
            ("task_2".to_string(), "short".to_string()),
        ];
        let prompt = synthesis_prompt("my goal", &results, 200);
        assert!(prompt.contains("Original Goal: my goal"));
        assert!(prompt.contains(&format!("Task task_1:\n{}", "y".repeat(200))));
        assert!(!prompt.contains(&"y".repeat(201)));
        assert!(prompt.contains("Task task_2:\nshort"));
    }

    /// **Scenario**: The synthesis call uses the synthesis token budget and
    /// returns the generator's text verbatim.
    #[tokio::test]
    async fn synthesis_uses_budget_and_returns_verbatim() {
        let llm = MockGenerator::fixed("the final answer");
        let mut log = RunLog::new();
        let results = vec![("task_1".to_string(), "r1".to_string())];
        let out = synthesize(
            &llm,
            &OrchestratorConfig::default(),
            &mut log,
            "g",
            &results,
        )
        .await
        .unwrap();
        assert_eq!(out, "the final answer");
        assert_eq!(llm.calls()[0].1, 350);
        assert!(log.entries().iter().any(|e| e.contains("Synthesizing")));
    }

    /// **Scenario**: A backend failure surfaces as a synthesis-phase error.
    #[tokio::test]
    async fn backend_failure_is_synthesis_error() {
        let llm = FailingGenerator::new("gone");
        let mut log = RunLog::new();
        let err = synthesize(&llm, &OrchestratorConfig::default(), &mut log, "g", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestrateError::Synthesis(_)));
    }
}
