//! Flattening task results into task and subtask rows.

use crate::clusters::MisalignmentCluster;
use crate::error::Result;
use crewsim_core::types::{TaskResult, Verdict};
use crewsim_runtime::persist::read_results;
use serde::Serialize;
use std::path::Path;

/// Characters of code kept in a snippet before truncation.
pub const SNIPPET_CHARS: usize = 100;

/// One task, one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    /// 1-based position of the record in its results file.
    pub task_id: usize,
    pub task: String,
    pub original_task: String,
    pub subtask_count: usize,
    pub avg_similarity: f64,
    pub misalignment: f64,
    pub errors: usize,
    pub error_sources: Vec<String>,
    pub success_rate: f64,
}

impl TaskRow {
    /// Error sources as written to CSV.
    pub fn joined_error_sources(&self) -> String {
        self.error_sources.join(", ")
    }
}

/// One subtask, one row, carrying its task id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtaskRow {
    pub task_id: usize,
    /// 1-based position within the task's workflow.
    pub subtask_id: usize,
    pub subtask: String,
    pub code_snippet: String,
    pub result: Verdict,
    pub similarity: f64,
    pub misalignment: f64,
    /// The description mentions an error, or the artifact was rejected.
    pub is_error: bool,
    pub cluster: MisalignmentCluster,
}

/// Every row from one results file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TraceData {
    pub tasks: Vec<TaskRow>,
    pub subtasks: Vec<SubtaskRow>,
}

impl TraceData {
    pub fn from_results(results: &[TaskResult]) -> Self {
        let mut data = TraceData::default();
        for (idx, result) in results.iter().enumerate() {
            let task_id = idx + 1;
            data.tasks.push(TaskRow {
                task_id,
                task: result.task().to_string(),
                original_task: result.original_task().to_string(),
                subtask_count: result.workflow().len(),
                avg_similarity: result.similarity(),
                misalignment: 1.0 - result.similarity(),
                errors: result.errors(),
                error_sources: result.error_sources().to_vec(),
                success_rate: result.success_rate(),
            });

            for (offset, subtask) in result.subtask_results().iter().enumerate() {
                let misalignment = 1.0 - subtask.similarity;
                data.subtasks.push(SubtaskRow {
                    task_id,
                    subtask_id: offset + 1,
                    subtask: subtask.subtask.clone(),
                    code_snippet: snippet(&subtask.code),
                    result: subtask.result,
                    similarity: subtask.similarity,
                    misalignment,
                    is_error: subtask.subtask.to_lowercase().contains("error")
                        || subtask.result == Verdict::Rejected,
                    cluster: MisalignmentCluster::classify(misalignment),
                });
            }
        }
        data
    }

    /// Subtask rows belonging to one task.
    pub fn subtasks_of(&self, task_id: usize) -> impl Iterator<Item = &SubtaskRow> {
        self.subtasks.iter().filter(move |s| s.task_id == task_id)
    }

    pub fn task(&self, task_id: usize) -> Option<&TaskRow> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Load and flatten a JSONL results file.
pub fn load_records(path: &Path) -> Result<TraceData> {
    let results = read_results(path)?;
    tracing::debug!(path = %path.display(), records = results.len(), "loaded results");
    Ok(TraceData::from_results(&results))
}

/// First [`SNIPPET_CHARS`] characters, with `...` when cut.
pub fn snippet(code: &str) -> String {
    let mut chars = code.chars();
    let head: String = chars.by_ref().take(SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewsim_core::types::SubtaskResult;

    fn result() -> TaskResult {
        TaskResult::assemble(
            "Add logging",
            "Add logging in a scalable way",
            vec!["Handle error paths".into(), "Write formatter".into()],
            vec![
                SubtaskResult {
                    subtask: "Handle error paths".into(),
                    code: "x".repeat(150),
                    result: Verdict::Approved,
                    similarity: 0.9,
                },
                SubtaskResult {
                    subtask: "Write formatter".into(),
                    code: "pass".into(),
                    result: Verdict::Rejected,
                    similarity: 0.1,
                },
            ],
            vec!["synthetic_ambiguity".into(), "natural_ambiguity".into()],
        )
    }

    #[test]
    fn flattens_rows() {
        let data = TraceData::from_results(&[result(), result()]);
        assert_eq!(data.tasks.len(), 2);
        assert_eq!(data.subtasks.len(), 4);
        assert_eq!(data.tasks[1].task_id, 2);
        assert_eq!(data.tasks[0].joined_error_sources(), "synthetic_ambiguity, natural_ambiguity");
        assert_eq!(data.tasks[0].success_rate, 0.5);
        assert_eq!(data.subtasks_of(2).count(), 2);
    }

    #[test]
    fn error_flag_and_misalignment() {
        let data = TraceData::from_results(&[result()]);
        let first = &data.subtasks[0];
        assert!(first.is_error, "description mentions an error");
        assert!((first.misalignment - 0.1).abs() < 1e-12);
        assert_eq!(first.cluster, MisalignmentCluster::Low);

        let second = &data.subtasks[1];
        assert!(second.is_error, "rejected");
        assert_eq!(second.cluster, MisalignmentCluster::Critical);
    }

    #[test]
    fn snippets_truncate_at_100_chars() {
        assert_eq!(snippet("short"), "short");
        let exact = "y".repeat(100);
        assert_eq!(snippet(&exact), exact);
        let long = snippet(&"x".repeat(150));
        assert_eq!(long.len(), 103);
        assert!(long.ends_with("..."));
    }
}
