//! crewsim CLI - simulate a software team and analyze its traces.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crewsim")]
#[command(
    author,
    version,
    about = "crewsim - multi-agent software team simulation",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default crewsim.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Run tasks through the simulated team
    Simulate {
        /// Task to run; repeat for several (default: the built-in tasks)
        #[arg(short, long = "task", conflicts_with = "generate")]
        tasks: Vec<String>,

        /// Generate this many feature requests instead
        #[arg(short, long)]
        generate: Option<usize>,

        /// Output directory (default: simulation.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed (default: simulation.seed, else random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Also write spans.jsonl
        #[arg(long)]
        spans: bool,

        /// Treat each task as a single subtask
        #[arg(long)]
        no_planning: bool,
    },

    /// Analyze a JSON Lines results file
    Analyze {
        /// Results file written by `crewsim simulate`
        input_file: PathBuf,

        /// Output directory (default: <output_dir>/analysis_<stem>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report span coverage for a span dump
    Coverage {
        /// spans.jsonl written by `crewsim simulate --spans`
        spans_file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Simulate {
            tasks,
            generate,
            output,
            seed,
            spans,
            no_planning,
        } => commands::simulate::run(commands::simulate::SimulateArgs {
            tasks,
            generate,
            output,
            seed,
            spans,
            no_planning,
            verbose: cli.verbose,
        }),
        Commands::Analyze { input_file, output } => commands::analyze::run(&input_file, output),
        Commands::Coverage { spans_file } => commands::coverage::run(&spans_file),
    }
}
