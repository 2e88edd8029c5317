//! CSV and text exports.

use crate::clusters::cluster_counts;
use crate::error::{AnalysisError, Result};
use crate::propagation::{error_propagation, outcome_errors};
use crate::records::TraceData;
use crate::report::AnalysisSummary;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const PROCESSED_TRACE_FILE: &str = "processed_trace_data.csv";
pub const TASK_SUMMARY_FILE: &str = "task_summary.csv";
pub const SUBTASK_DETAILS_FILE: &str = "subtask_details.csv";
pub const ROLE_ERROR_FILE: &str = "role_error_metrics.csv";
pub const CLUSTERS_FILE: &str = "misalignment_clusters.csv";
pub const PROPAGATION_FILE: &str = "error_propagation.csv";
pub const SUMMARY_FILE: &str = "analysis_summary.txt";

/// Everything [`write_analysis`] writes, in write order.
pub const ANALYSIS_FILES: [&str; 7] = [
    PROCESSED_TRACE_FILE,
    TASK_SUMMARY_FILE,
    SUBTASK_DETAILS_FILE,
    ROLE_ERROR_FILE,
    CLUSTERS_FILE,
    PROPAGATION_FILE,
    SUMMARY_FILE,
];

/// Quote a field when it holds a comma, quote, or line break.
pub fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn task_summary_csv(data: &TraceData) -> String {
    let mut csv = String::from(
        "task_id,task,original_task,subtask_count,avg_similarity,errors,error_sources,success_rate\n",
    );
    for t in &data.tasks {
        let _ = writeln!(
            csv,
            "{},{},{},{},{:.4},{},{},{:.4}",
            t.task_id,
            csv_field(&t.task),
            csv_field(&t.original_task),
            t.subtask_count,
            t.avg_similarity,
            t.errors,
            csv_field(&t.joined_error_sources()),
            t.success_rate
        );
    }
    csv
}

pub fn subtask_details_csv(data: &TraceData) -> String {
    let mut csv = String::from("main_task_id,subtask_id,subtask,result,similarity,code_snippet\n");
    for s in &data.subtasks {
        let _ = writeln!(
            csv,
            "{},{},{},{},{:.4},{}",
            s.task_id,
            s.subtask_id,
            csv_field(&s.subtask),
            s.result.as_str(),
            s.similarity,
            csv_field(&s.code_snippet)
        );
    }
    csv
}

/// Subtask rows with the derived analysis columns.
pub fn processed_trace_csv(data: &TraceData) -> String {
    let mut csv = String::from(
        "task_id,subtask_id,subtask,result,similarity,misalignment,is_error,cluster,code_snippet\n",
    );
    for s in &data.subtasks {
        let _ = writeln!(
            csv,
            "{},{},{},{},{:.4},{:.4},{},{},{}",
            s.task_id,
            s.subtask_id,
            csv_field(&s.subtask),
            s.result.as_str(),
            s.similarity,
            s.misalignment,
            s.is_error,
            s.cluster,
            csv_field(&s.code_snippet)
        );
    }
    csv
}

pub fn role_error_csv(data: &TraceData) -> String {
    let mut csv = String::from("result,non_errors,errors,error_rate\n");
    for row in outcome_errors(&data.subtasks) {
        let _ = writeln!(
            csv,
            "{},{},{},{:.4}",
            row.result.as_str(),
            row.non_errors,
            row.errors,
            row.error_rate
        );
    }
    csv
}

pub fn clusters_csv(data: &TraceData) -> String {
    let mut csv = String::from("cluster,count\n");
    for (cluster, count) in cluster_counts(&data.subtasks) {
        let _ = writeln!(csv, "{cluster},{count}");
    }
    csv
}

pub fn propagation_csv(data: &TraceData) -> String {
    let mut csv = String::from("task_id,error_propagation\n");
    for row in error_propagation(data) {
        let _ = writeln!(csv, "{},{:.4}", row.task_id, row.error_propagation);
    }
    csv
}

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|e| AnalysisError::write(&path, e))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote analysis file");
    Ok(path)
}

/// Write every analysis file into `dir`, creating it if needed.
///
/// Returns the written paths in [`ANALYSIS_FILES`] order.
pub fn write_analysis(dir: &Path, data: &TraceData) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| AnalysisError::write(dir, e))?;

    let summary = AnalysisSummary::compute(data);
    let tables = [
        (PROCESSED_TRACE_FILE, processed_trace_csv(data)),
        (TASK_SUMMARY_FILE, task_summary_csv(data)),
        (SUBTASK_DETAILS_FILE, subtask_details_csv(data)),
        (ROLE_ERROR_FILE, role_error_csv(data)),
        (CLUSTERS_FILE, clusters_csv(data)),
        (PROPAGATION_FILE, propagation_csv(data)),
        (SUMMARY_FILE, summary.render(&ANALYSIS_FILES[..6])),
    ];

    let mut written = Vec::with_capacity(tables.len());
    for (name, contents) in &tables {
        written.push(write_file(dir, name, contents)?);
    }
    tracing::info!(
        dir = %dir.display(),
        tasks = data.tasks.len(),
        subtasks = data.subtasks.len(),
        "analysis written"
    );
    Ok(written)
}
