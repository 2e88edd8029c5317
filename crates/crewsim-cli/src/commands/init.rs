//! Initialize a crewsim project.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<PathBuf>) -> Result<()> {
    let base_path = match path {
        Some(p) => p,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing crewsim project...", "→".blue());

    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config = Config::default();
    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        config.save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    let results_dir = base_path.join(&config.simulation.output_dir);
    std::fs::create_dir_all(&results_dir)
        .with_context(|| format!("Failed to create {}", results_dir.display()))?;
    println!("  {} Created {}", "✓".green(), results_dir.display());

    println!();
    println!("{} crewsim project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} crewsim simulate --spans", "1.".blue());
    println!("  {} crewsim analyze results/full_results.jsonl", "2.".blue());
    println!("  {} crewsim coverage results/spans.jsonl", "3.".blue());

    Ok(())
}
