//! Analyze a results file.

use anyhow::{Context, Result};
use colored::Colorize;
use crewsim::analysis::prelude::*;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// `<output_dir>/analysis_<stem>` for an input file.
pub fn default_output_dir(output_root: &str, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string());
    Path::new(output_root).join(format!("analysis_{stem}"))
}

pub fn run(input: &Path, output: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let output_dir =
        output.unwrap_or_else(|| default_output_dir(&config.simulation.output_dir, input));

    println!("{} Loading {}...", "→".blue(), input.display());
    let data = load_records(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    println!(
        "  Loaded: {} tasks, {} subtasks",
        data.tasks.len().to_string().cyan(),
        data.subtasks.len().to_string().cyan()
    );

    let written = write_analysis(&output_dir, &data)?;
    for path in &written {
        println!("  {} Wrote {}", "✓".green(), path.display());
    }

    let summary = AnalysisSummary::compute(&data);
    println!();
    print!("{}", summary.render(&[]));
    println!();
    println!(
        "{} Analysis written to {}",
        "✓".green().bold(),
        output_dir.display().to_string().cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_uses_the_file_stem() {
        let dir = default_output_dir("results", Path::new("runs/full_results.jsonl"));
        assert_eq!(dir, Path::new("results").join("analysis_full_results"));
    }
}
