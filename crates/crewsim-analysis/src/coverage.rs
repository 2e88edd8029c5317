//! Span coverage over a span dump.
//!
//! Each `task.run` root is one task. A kind is present for a task when the
//! root itself (for `task.run`) or one of its direct children has that kind.

use crate::error::Result;
use crewsim_core::span::SpanId;
use crewsim_runtime::persist::read_jsonl;
use crewsim_runtime::telemetry::SpanRecord;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Span kinds the pipeline emits per task.
pub const SPAN_KINDS: [&str; 3] = ["task.run", "planner.decompose", "subtask"];

/// Coverage of one span kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRow {
    pub span_kind: String,
    pub present: usize,
    pub total: usize,
    pub coverage_rate: f64,
}

/// Coverage of every kind, in [`SPAN_KINDS`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub rows: Vec<CoverageRow>,
}

impl CoverageReport {
    pub fn row(&self, kind: &str) -> Option<&CoverageRow> {
        self.rows.iter().find(|r| r.span_kind == kind)
    }

    /// Plain-text table.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("SPAN COVERAGE REPORT\n");
        out.push_str(&"=".repeat(50));
        out.push('\n');
        out.push_str(&format!(
            "{:<20} {:>14} {:>8} {:>8}\n",
            "Span Type", "Coverage Rate", "Present", "Total"
        ));
        for row in &self.rows {
            out.push_str(&format!(
                "{:<20} {:>13.1}% {:>8} {:>8}\n",
                row.span_kind,
                row.coverage_rate * 100.0,
                row.present,
                row.total
            ));
        }
        out
    }
}

/// Kind of a span name: `subtask.3` → `subtask`, anything else as-is.
pub fn span_kind(name: &str) -> &str {
    match name.split_once('.') {
        Some(("subtask", index)) if index.chars().all(|c| c.is_ascii_digit()) => "subtask",
        _ => name,
    }
}

/// Compute coverage from recorded spans.
pub fn span_coverage(spans: &[SpanRecord]) -> CoverageReport {
    let roots: Vec<SpanId> = spans
        .iter()
        .filter(|s| s.parent.is_none() && s.name == "task.run")
        .map(|s| s.id)
        .collect();

    let mut child_kinds: HashMap<SpanId, HashSet<&str>> = HashMap::new();
    for span in spans {
        if let Some(parent) = span.parent {
            child_kinds.entry(parent).or_default().insert(span_kind(&span.name));
        }
    }

    let total = roots.len();
    let rows = SPAN_KINDS
        .iter()
        .map(|&kind| {
            let present = if kind == "task.run" {
                total
            } else {
                roots
                    .iter()
                    .filter(|root| child_kinds.get(*root).is_some_and(|kinds| kinds.contains(kind)))
                    .count()
            };
            CoverageRow {
                span_kind: kind.to_string(),
                present,
                total,
                coverage_rate: if total == 0 { 0.0 } else { present as f64 / total as f64 },
            }
        })
        .collect();

    CoverageReport { rows }
}

/// Load a span dump and compute coverage.
pub fn load_span_coverage(path: &Path) -> Result<CoverageReport> {
    let spans: Vec<SpanRecord> = read_jsonl(path)?;
    Ok(span_coverage(&spans))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewsim_core::span::SpanRecorder;
    use crewsim_runtime::telemetry::MemoryRecorder;

    #[test]
    fn kinds() {
        assert_eq!(span_kind("subtask.12"), "subtask");
        assert_eq!(span_kind("subtask.x"), "subtask.x");
        assert_eq!(span_kind("planner.decompose"), "planner.decompose");
    }

    #[test]
    fn coverage_counts_per_root() {
        let recorder = MemoryRecorder::new();
        let first = recorder.start_span("task.run", None);
        recorder.start_span("planner.decompose", Some(first));
        recorder.start_span("subtask.1", Some(first));
        recorder.start_span("subtask.2", Some(first));
        let second = recorder.start_span("task.run", None);
        recorder.start_span("subtask.1", Some(second));

        let report = span_coverage(&recorder.spans());
        assert_eq!(report.row("task.run").unwrap().present, 2);
        let planner = report.row("planner.decompose").unwrap();
        assert_eq!((planner.present, planner.total), (1, 2));
        assert_eq!(planner.coverage_rate, 0.5);
        assert_eq!(report.row("subtask").unwrap().coverage_rate, 1.0);
        assert!(report.render().contains("planner.decompose"));
    }

    #[test]
    fn no_roots_is_zero_coverage() {
        let report = span_coverage(&[]);
        assert!(report.rows.iter().all(|r| r.total == 0 && r.coverage_rate == 0.0));
    }
}
