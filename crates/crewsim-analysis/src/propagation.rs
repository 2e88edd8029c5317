//! Error tables: by reviewer outcome, and per task.

use crate::records::{SubtaskRow, TraceData};
use crewsim_core::types::Verdict;
use serde::Serialize;

/// Error counts for one reviewer outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeErrorRow {
    pub result: Verdict,
    pub non_errors: usize,
    pub errors: usize,
    pub error_rate: f64,
}

/// Error rows for each outcome that occurs, Approved first.
pub fn outcome_errors(subtasks: &[SubtaskRow]) -> Vec<OutcomeErrorRow> {
    [Verdict::Approved, Verdict::Rejected]
        .into_iter()
        .filter_map(|result| {
            let rows: Vec<&SubtaskRow> = subtasks.iter().filter(|s| s.result == result).collect();
            if rows.is_empty() {
                return None;
            }
            let errors = rows.iter().filter(|s| s.is_error).count();
            Some(OutcomeErrorRow {
                result,
                non_errors: rows.len() - errors,
                errors,
                error_rate: errors as f64 / rows.len() as f64,
            })
        })
        .collect()
}

/// Share of a task's subtasks flagged as errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPropagation {
    pub task_id: usize,
    pub error_propagation: f64,
}

/// Propagation for every task with at least one subtask.
pub fn error_propagation(data: &TraceData) -> Vec<TaskPropagation> {
    data.tasks
        .iter()
        .filter_map(|task| {
            let (total, errors) = data
                .subtasks_of(task.task_id)
                .fold((0usize, 0usize), |(n, e), s| (n + 1, e + usize::from(s.is_error)));
            (total > 0).then(|| TaskPropagation {
                task_id: task.task_id,
                error_propagation: errors as f64 / total as f64,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewsim_core::types::{SubtaskResult, TaskResult};

    fn task(verdicts: &[Verdict]) -> TaskResult {
        let subtasks: Vec<SubtaskResult> = verdicts
            .iter()
            .map(|&result| SubtaskResult {
                subtask: "Write handler".into(),
                code: "return 1".into(),
                result,
                similarity: 0.5,
            })
            .collect();
        let workflow = subtasks.iter().map(|s| s.subtask.clone()).collect();
        TaskResult::assemble("t", "t", workflow, subtasks, vec![])
    }

    #[test]
    fn outcome_table() {
        let verdicts = [Verdict::Approved, Verdict::Rejected, Verdict::Approved];
        let data = TraceData::from_results(&[task(&verdicts)]);
        let rows = outcome_errors(&data.subtasks);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].result, Verdict::Approved);
        assert_eq!(rows[0].errors, 0);
        assert_eq!(rows[0].error_rate, 0.0);
        assert_eq!(rows[1].errors, 1);
        assert_eq!(rows[1].error_rate, 1.0);
    }

    #[test]
    fn propagation_skips_empty_tasks() {
        let data = TraceData::from_results(&[
            task(&[Verdict::Approved, Verdict::Rejected]),
            task(&[]),
            task(&[Verdict::Rejected]),
        ]);
        let rows = error_propagation(&data);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].error_propagation, 0.5);
        assert_eq!(rows[1].task_id, 3);
        assert_eq!(rows[1].error_propagation, 1.0);
    }
}
