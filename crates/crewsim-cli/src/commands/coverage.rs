//! Span coverage for a span dump.

use anyhow::{Context, Result};
use colored::Colorize;
use crewsim::analysis::coverage::load_span_coverage;
use std::path::Path;

pub fn run(spans_file: &Path) -> Result<()> {
    let report = load_span_coverage(spans_file)
        .with_context(|| format!("Failed to read spans from {}", spans_file.display()))?;

    println!();
    print!("{}", report.render());

    let incomplete: Vec<&str> = report
        .rows
        .iter()
        .filter(|r| r.total > 0 && r.present < r.total)
        .map(|r| r.span_kind.as_str())
        .collect();
    println!();
    if report.rows.iter().all(|r| r.total == 0) {
        println!("{} No task.run spans found", "•".yellow());
    } else if incomplete.is_empty() {
        println!("{} Every task has full span coverage", "✓".green().bold());
    } else {
        println!("{} Missing for some tasks: {}", "•".yellow(), incomplete.join(", "));
    }

    Ok(())
}
