//! Headline numbers for an analysis run.

use crate::clusters::MisalignmentCluster;
use crate::records::TraceData;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub tasks_analyzed: usize,
    pub subtasks_analyzed: usize,
    pub average_misalignment: f64,
    pub overall_error_rate: f64,
    pub critical_misalignment_rate: f64,
}

impl AnalysisSummary {
    /// Means over subtask rows; zero when there are none.
    pub fn compute(data: &TraceData) -> Self {
        let n = data.subtasks.len();
        let mean = |sum: f64| if n == 0 { 0.0 } else { sum / n as f64 };

        let misalignment: f64 = data.subtasks.iter().map(|s| s.misalignment).sum();
        let errors = data.subtasks.iter().filter(|s| s.is_error).count();
        let critical = data
            .subtasks
            .iter()
            .filter(|s| s.cluster == MisalignmentCluster::Critical)
            .count();

        Self {
            tasks_analyzed: data.tasks.len(),
            subtasks_analyzed: n,
            average_misalignment: mean(misalignment),
            overall_error_rate: mean(errors as f64),
            critical_misalignment_rate: mean(critical as f64),
        }
    }

    /// Text written to `analysis_summary.txt`.
    pub fn render(&self, files: &[&str]) -> String {
        let mut out = String::new();
        out.push_str("TRACE ANALYSIS SUMMARY\n");
        out.push_str(&"=".repeat(50));
        out.push_str("\n\n");
        out.push_str(&format!("Tasks Analyzed: {}\n", self.tasks_analyzed));
        out.push_str(&format!("Subtasks Analyzed: {}\n\n", self.subtasks_analyzed));
        out.push_str("Key Metrics:\n");
        out.push_str(&format!(
            "- Average Misalignment Score: {:.2}\n",
            self.average_misalignment
        ));
        out.push_str(&format!("- Overall Error Rate: {:.2}\n", self.overall_error_rate));
        out.push_str(&format!(
            "- Critical Misalignment Rate: {:.2}\n",
            self.critical_misalignment_rate
        ));
        if !files.is_empty() {
            out.push_str("\nFiles Written:\n");
            for file in files {
                out.push_str(&format!("- {file}\n"));
            }
        }
        out
    }
}
