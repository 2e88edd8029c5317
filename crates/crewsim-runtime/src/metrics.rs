//! Run-level metrics over a batch of task results.

use crewsim_core::catalog::tag_family;
use crewsim_core::types::TaskResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate metrics for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetrics {
    pub task_count: usize,
    pub subtask_count: usize,
    pub approved_count: usize,
    /// approved / subtasks.
    pub approval_rate: f64,
    /// Mean similarity over all subtasks.
    pub mean_similarity: f64,
    /// Fraction of tasks with at least one error source.
    pub error_incidence_rate: f64,
    /// Error-source family → occurrences.
    pub error_source_counts: BTreeMap<String, usize>,
}

/// Summarize task results. Every rate is 0 when its denominator is.
pub fn summarize(results: &[TaskResult]) -> RunMetrics {
    let task_count = results.len();
    let mut subtask_count = 0;
    let mut approved_count = 0;
    let mut similarity_sum = 0.0;
    let mut tasks_with_errors = 0;
    let mut error_source_counts = BTreeMap::new();

    for result in results {
        for subtask in result.subtask_results() {
            subtask_count += 1;
            similarity_sum += subtask.similarity;
            if subtask.result.is_approved() {
                approved_count += 1;
            }
        }
        if result.errors() > 0 {
            tasks_with_errors += 1;
        }
        for tag in result.error_sources() {
            *error_source_counts
                .entry(tag_family(tag).to_string())
                .or_insert(0) += 1;
        }
    }

    RunMetrics {
        task_count,
        subtask_count,
        approved_count,
        approval_rate: ratio(approved_count as f64, subtask_count),
        mean_similarity: ratio(similarity_sum, subtask_count),
        error_incidence_rate: ratio(tasks_with_errors as f64, task_count),
        error_source_counts,
    }
}

fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewsim_core::types::{SubtaskResult, Verdict};

    fn subtask(similarity: f64, result: Verdict) -> SubtaskResult {
        SubtaskResult {
            subtask: "s".into(),
            code: "c".into(),
            result,
            similarity,
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        let metrics = summarize(&[]);
        assert_eq!(metrics.task_count, 0);
        assert_eq!(metrics.approval_rate, 0.0);
        assert_eq!(metrics.mean_similarity, 0.0);
        assert_eq!(metrics.error_incidence_rate, 0.0);
        assert!(metrics.error_source_counts.is_empty());
    }

    #[test]
    fn counts_and_rates() {
        let a = TaskResult::assemble(
            "t1",
            "t1 in a scalable way",
            vec!["x".into(), "y".into()],
            vec![subtask(0.2, Verdict::Approved), subtask(0.6, Verdict::Rejected)],
            vec![
                "synthetic_ambiguity".into(),
                "natural_ambiguity".into(),
                "subtask_2_bad_code".into(),
            ],
        );
        let b = TaskResult::assemble(
            "t2",
            "t2",
            vec!["z".into()],
            vec![subtask(1.0, Verdict::Approved)],
            vec![],
        );
        let c = TaskResult::assemble("t3", "t3", vec![], vec![], vec![]);

        let metrics = summarize(&[a, b, c]);
        assert_eq!(metrics.task_count, 3);
        assert_eq!(metrics.subtask_count, 3);
        assert_eq!(metrics.approved_count, 2);
        assert!((metrics.approval_rate - 2.0 / 3.0).abs() < 1e-12);
        assert!((metrics.mean_similarity - 0.6).abs() < 1e-12);
        assert!((metrics.error_incidence_rate - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(metrics.error_source_counts["bad_code"], 1);
        assert_eq!(metrics.error_source_counts["synthetic_ambiguity"], 1);
    }
}
