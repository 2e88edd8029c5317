//! Run tasks through the simulated team.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use crewsim::prelude::*;
use crewsim::runtime::persist::write_jsonl;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, EmbeddingProvider};

pub const RESULTS_FILE: &str = "full_results.jsonl";
pub const SPANS_FILE: &str = "spans.jsonl";
pub const METRICS_FILE: &str = "run_metrics.json";

pub struct SimulateArgs {
    pub tasks: Vec<String>,
    pub generate: Option<usize>,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
    pub spans: bool,
    pub no_planning: bool,
    pub verbose: bool,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let mut config = Config::load()?;
    if args.no_planning {
        config.simulation.planning_enabled = false;
    }

    let seed = args
        .seed
        .or(config.simulation.seed)
        .unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let tasks = match args.generate {
        Some(count) => generate_tasks(&config, count, &mut rng)?,
        None if !args.tasks.is_empty() => args.tasks.clone(),
        None => DEFAULT_TASKS.iter().map(|t| t.to_string()).collect(),
    };
    if tasks.is_empty() {
        bail!("No tasks to run");
    }

    let memory = Arc::new(MemoryRecorder::new());
    let recorder: Arc<dyn SpanRecorder> = if args.spans {
        memory.clone()
    } else {
        Arc::new(LogRecorder::new())
    };
    let orchestrator = build_orchestrator(&config)?.with_recorder(recorder);

    println!(
        "{} Running {} tasks (seed {})...",
        "→".blue(),
        tasks.len().to_string().cyan(),
        seed.to_string().cyan()
    );

    let pb = ProgressBar::new(tasks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} tasks")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    let outcomes = run_batch_with(&orchestrator, &tasks, &mut rng, |index, outcome| {
        if let TaskOutcome::Failed { task, error } = outcome {
            pb.println(format!(
                "  {} Task {} failed: {} ({})",
                "✗".red(),
                index + 1,
                task,
                error
            ));
        }
        pb.inc(1);
    });
    pb.finish_and_clear();

    let failed = outcomes.iter().filter(|o| !o.is_completed()).count();
    let results = completed_results(outcomes);

    println!();
    for (index, result) in results.iter().enumerate() {
        print_task(index + 1, result, args.verbose);
    }

    let output_dir = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.simulation.output_dir));
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let results_path = output_dir.join(RESULTS_FILE);
    write_results(&results_path, &results)
        .with_context(|| format!("Failed to write {}", results_path.display()))?;

    let metrics = summarize(&results);
    let metrics_path = output_dir.join(METRICS_FILE);
    let metrics_json =
        serde_json::to_string_pretty(&metrics).context("Failed to serialize metrics")?;
    std::fs::write(&metrics_path, metrics_json)
        .with_context(|| format!("Failed to write {}", metrics_path.display()))?;

    let spans_path = if args.spans {
        let path = output_dir.join(SPANS_FILE);
        write_jsonl(&path, &memory.spans())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Some(path)
    } else {
        None
    };

    print_metrics(&metrics, failed);

    println!();
    println!("{} Simulation complete!", "✓".green().bold());
    println!("  Results: {}", results_path.display().to_string().cyan());
    println!("  Metrics: {}", metrics_path.display().to_string().cyan());
    if let Some(path) = spans_path {
        println!("  Spans:   {}", path.display().to_string().cyan());
    }

    Ok(())
}

fn print_task(number: usize, result: &TaskResult, verbose: bool) {
    let approved = result
        .subtask_results()
        .iter()
        .filter(|s| s.result.is_approved())
        .count();
    println!("{} Task {}: {}", "•".blue(), number, result.task().bold());
    println!(
        "  Subtasks: {}  Approved: {}/{}  Similarity: {:.3}",
        result.workflow().len(),
        approved,
        result.subtask_results().len(),
        result.similarity()
    );
    if result.errors() > 0 {
        println!(
            "  Errors: {}",
            result.error_sources().join(", ").yellow()
        );
    }
    if verbose {
        for (i, subtask) in result.subtask_results().iter().enumerate() {
            let verdict = if subtask.result.is_approved() {
                subtask.result.as_str().green()
            } else {
                subtask.result.as_str().red()
            };
            println!(
                "    {}. {} [{}] {:.3}",
                i + 1,
                subtask.subtask,
                verdict,
                subtask.similarity
            );
        }
    }
}

fn print_metrics(metrics: &RunMetrics, failed: usize) {
    println!();
    println!("{}", "Run metrics".bold());
    println!("  Tasks:            {}", metrics.task_count.to_string().cyan());
    if failed > 0 {
        println!("  Failed tasks:     {}", failed.to_string().red());
    }
    println!("  Subtasks:         {}", metrics.subtask_count.to_string().cyan());
    println!(
        "  Approval rate:    {}",
        format!("{:.2}", metrics.approval_rate).cyan()
    );
    println!(
        "  Mean similarity:  {}",
        format!("{:.3}", metrics.mean_similarity).cyan()
    );
    println!(
        "  Error incidence:  {}",
        format!("{:.2}", metrics.error_incidence_rate).cyan()
    );
    for (family, count) in &metrics.error_source_counts {
        println!("    {family}: {count}");
    }
}

fn build_orchestrator(config: &Config) -> Result<Orchestrator> {
    let mut pool = WorkerPool::empty();
    for _ in 0..config.simulation.num_coders {
        pool = pool.with_coder(TemplateCoder);
    }
    for _ in 0..config.simulation.num_reviewers {
        pool = pool.with_reviewer(HeuristicReviewer::new(config.reviewer.clone()));
    }
    if pool.ensure_staffed().is_err() {
        tracing::warn!(
            coders = pool.coder_count(),
            reviewers = pool.reviewer_count(),
            "worker pool is understaffed; every task will fail"
        );
    }

    let planner: Box<dyn Planner> = if config.llm.enabled {
        let llm = &config.llm;
        Box::new(
            LlmPlanner::new(llm_backend(config)?)
                .with_temperature(llm.temperature)
                .with_max_tokens(llm.max_tokens),
        )
    } else {
        Box::new(KeywordPlanner)
    };

    let scorer = EmbeddingScorer::new(build_embedder(config)?);
    let orchestrator = Orchestrator::new(config.orchestrator(), planner, pool, scorer)?;
    Ok(orchestrator)
}

fn generate_tasks(config: &Config, count: usize, rng: &mut StdRng) -> Result<Vec<String>> {
    let generator: TaskGenerator<Box<dyn LlmBackend>> = if config.llm.enabled {
        TaskGenerator::new(llm_backend(config)?)
    } else {
        TaskGenerator::offline()
    };
    Ok(generator.generate_batch(count, rng))
}

fn build_embedder(config: &Config) -> Result<Box<dyn Embedder>> {
    match config.embedding.provider {
        EmbeddingProvider::Simple => Ok(Box::new(SimpleEmbedder::new(config.embedding.dimension))),
        EmbeddingProvider::OpenAi => api_embedder(config),
    }
}

#[cfg(feature = "api")]
fn llm_backend(config: &Config) -> Result<Box<dyn LlmBackend>> {
    let llm = &config.llm;
    let llm_config = LlmConfig::openai()
        .with_model(llm.model.clone())
        .with_temperature(llm.temperature)
        .with_max_tokens(llm.max_tokens)
        .with_timeout(llm.timeout_secs);
    let backend = OpenAiBackend::from_env_with_config(llm_config)
        .context("Failed to set up the OpenAI backend")?;
    Ok(Box::new(backend))
}

#[cfg(not(feature = "api"))]
fn llm_backend(_config: &Config) -> Result<Box<dyn LlmBackend>> {
    bail!("llm.enabled requires crewsim-cli built with the `api` feature")
}

#[cfg(feature = "api")]
fn api_embedder(config: &Config) -> Result<Box<dyn Embedder>> {
    let api_config = ApiConfig::from_env()
        .context("Failed to set up OpenAI embeddings")?
        .with_model(&config.embedding.model)
        .with_timeout(u64::from(config.llm.timeout_secs));
    Ok(Box::new(ApiEmbedder::new(api_config)?))
}

#[cfg(not(feature = "api"))]
fn api_embedder(_config: &Config) -> Result<Box<dyn Embedder>> {
    bail!("embedding.provider = \"openai\" requires crewsim-cli built with the `api` feature")
}
