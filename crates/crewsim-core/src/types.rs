//! Shared types used across the pipeline and its crates.

use serde::{Deserialize, Serialize};

/// Reviewer verdict for one code artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    pub fn from_approved(approved: bool) -> Self {
        if approved {
            Verdict::Approved
        } else {
            Verdict::Rejected
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approved => "Approved",
            Verdict::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw item of a planner's decomposition.
///
/// Planners backed by a language model can hand back objects or numbers
/// where a subtask description was expected. Those survive as `Structured`
/// until the orchestrator coerces them.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowStep {
    Text(String),
    Structured(serde_json::Value),
}

impl WorkflowStep {
    /// Convert into a subtask description.
    ///
    /// Returns the text and whether a coercion from a non-string value happened.
    pub fn into_description(self) -> (String, bool) {
        match self {
            WorkflowStep::Text(text) => (text, false),
            WorkflowStep::Structured(serde_json::Value::String(text)) => (text, false),
            WorkflowStep::Structured(value) => (value.to_string(), true),
        }
    }

    /// Classify a JSON value coming out of a planner response.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => WorkflowStep::Text(text),
            other => WorkflowStep::Structured(other),
        }
    }
}

impl From<String> for WorkflowStep {
    fn from(text: String) -> Self {
        WorkflowStep::Text(text)
    }
}

impl From<&str> for WorkflowStep {
    fn from(text: &str) -> Self {
        WorkflowStep::Text(text.to_string())
    }
}

/// Outcome of one subtask: generated artifact, verdict and alignment score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtaskResult {
    pub subtask: String,
    pub code: String,
    pub result: Verdict,
    /// Description/artifact alignment in [0, 1].
    pub similarity: f64,
}

/// Outcome of one orchestrator run.
///
/// Fields are private: a `TaskResult` is only built through [`TaskResult::assemble`]
/// (or deserialized from a results file), so the aggregate fields always agree
/// with the subtask list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    task: String,
    original_task: String,
    workflow: Vec<String>,
    subtask_results: Vec<SubtaskResult>,
    similarity: f64,
    errors: usize,
    error_sources: Vec<String>,
}

impl TaskResult {
    /// Freeze a finished run, deriving the mean similarity and error count.
    pub fn assemble(
        original_task: impl Into<String>,
        assigned_task: impl Into<String>,
        workflow: Vec<String>,
        subtask_results: Vec<SubtaskResult>,
        error_sources: Vec<String>,
    ) -> Self {
        debug_assert_eq!(workflow.len(), subtask_results.len());
        let similarity = mean_similarity(&subtask_results);
        Self {
            task: assigned_task.into(),
            original_task: original_task.into(),
            workflow,
            subtask_results,
            similarity,
            errors: error_sources.len(),
            error_sources,
        }
    }

    /// The task as assigned (possibly ambiguity-augmented).
    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn original_task(&self) -> &str {
        &self.original_task
    }

    pub fn workflow(&self) -> &[String] {
        &self.workflow
    }

    pub fn subtask_results(&self) -> &[SubtaskResult] {
        &self.subtask_results
    }

    /// Mean subtask similarity, 0 for an empty workflow.
    pub fn similarity(&self) -> f64 {
        self.similarity
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn error_sources(&self) -> &[String] {
        &self.error_sources
    }

    /// Fraction of subtasks approved, 0 for an empty workflow.
    pub fn success_rate(&self) -> f64 {
        if self.subtask_results.is_empty() {
            return 0.0;
        }
        let approved = self
            .subtask_results
            .iter()
            .filter(|s| s.result.is_approved())
            .count();
        approved as f64 / self.subtask_results.len() as f64
    }
}

fn mean_similarity(results: &[SubtaskResult]) -> f64 {
    if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| r.similarity).sum::<f64>() / results.len() as f64
    }
}
