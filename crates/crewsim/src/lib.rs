//! # Crewsim
//!
//! A simulated software team that turns feature requests into code, with
//! controlled noise and full span tracing.
//!
//! A planner decomposes each task into subtasks. Coders draft an artifact per
//! subtask, reviewers accept or reject it, and an embedding scorer measures
//! how well the artifact matches its description. Ambiguity and corrupted
//! artifacts can be injected at configurable rates, so misalignment can be
//! studied from the recorded results and spans.
//!
//! ## Quick Start
//!
//! ```rust
//! use crewsim::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let orchestrator = crewsim::default_orchestrator(OrchestratorConfig::default()).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let result = orchestrator.run_task("Implement user login with OAuth", &mut rng).unwrap();
//! assert_eq!(result.workflow().len(), result.subtask_results().len());
//!
//! let metrics = summarize(&[result]);
//! println!("approval rate: {:.2}", metrics.approval_rate);
//! ```
//!
//! ## Architecture
//!
//! - [`crewsim_core`] - Role traits, the result model, catalogs and text cleaning
//! - [`crewsim_agents`] - Planners, coders and reviewers that run offline
//! - [`crewsim_embeddings`] - Embedders and the similarity scorer
//! - [`crewsim_runtime`] - Orchestrator, noise, worker pool, spans, persistence
//! - [`crewsim_analysis`] - Trace analysis and CSV exports
//! - `crewsim_llm` - LLM planner and task generator (feature `llm`)
//!
//! ## Noise
//!
//! | Injection | Default rate | Error source |
//! |-----------|--------------|--------------|
//! | Ambiguity | 0.3 | `synthetic_ambiguity` |
//! | Bad code  | 0.1 | `subtask_{i}_bad_code` |
//!
//! Tasks that already contain a vague qualifier are tagged
//! `natural_ambiguity`, and non-string planner steps `subtask_{i}_type_conversion`.
//!
//! ## Spans
//!
//! ```rust
//! use crewsim::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use std::sync::Arc;
//!
//! let recorder = Arc::new(MemoryRecorder::new());
//! let orchestrator = crewsim::default_orchestrator(OrchestratorConfig::default())
//!     .unwrap()
//!     .with_recorder(recorder.clone());
//!
//! orchestrator.run_task("Add payment processing system", &mut StdRng::seed_from_u64(7)).unwrap();
//! let report = span_coverage(&recorder.spans());
//! assert_eq!(report.row("task.run").unwrap().coverage_rate, 1.0);
//! ```

// Re-export all subcrates
pub use crewsim_agents as agents;
pub use crewsim_analysis as analysis;
pub use crewsim_core as core;
pub use crewsim_embeddings as embeddings;
pub use crewsim_runtime as runtime;

#[cfg(feature = "llm")]
pub use crewsim_llm as llm;

use crewsim_agents::coder::TemplateCoder;
use crewsim_agents::planner::KeywordPlanner;
use crewsim_agents::reviewer::HeuristicReviewer;
use crewsim_embeddings::{EmbeddingScorer, SimpleEmbedder};
use crewsim_runtime::orchestrator::{Orchestrator, OrchestratorConfig};
use crewsim_runtime::pool::WorkerPool;

/// Coders in the default pool.
pub const DEFAULT_CODERS: usize = 2;

/// Reviewers in the default pool.
pub const DEFAULT_REVIEWERS: usize = 1;

/// An orchestrator that needs no network: keyword planner, template coders,
/// heuristic reviewer and a 256-dimension local embedder.
pub fn default_orchestrator(
    config: OrchestratorConfig,
) -> crewsim_core::error::Result<Orchestrator> {
    let mut pool = WorkerPool::empty();
    for _ in 0..DEFAULT_CODERS {
        pool = pool.with_coder(TemplateCoder);
    }
    for _ in 0..DEFAULT_REVIEWERS {
        pool = pool.with_reviewer(HeuristicReviewer::default());
    }
    Orchestrator::new(
        config,
        KeywordPlanner,
        pool,
        EmbeddingScorer::new(SimpleEmbedder::default()),
    )
}

/// Prelude module for convenient imports.
///
/// ```rust
/// use crewsim::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use crewsim_core::prelude::*;

    // Agents
    pub use crewsim_agents::coder::{CannedCoder, EchoCoder, FixedCoder, TemplateCoder};
    pub use crewsim_agents::planner::{FailingPlanner, KeywordPlanner, StaticPlanner};
    pub use crewsim_agents::reviewer::{HeuristicReviewer, LengthReviewer, ReviewerConfig};

    // Embeddings
    pub use crewsim_embeddings::{Embedder, EmbeddingScorer, SimpleEmbedder};

    // Runtime
    pub use crewsim_runtime::batch::{completed_results, run_batch, run_batch_with, TaskOutcome};
    pub use crewsim_runtime::metrics::{summarize, RunMetrics};
    pub use crewsim_runtime::noise::{NoiseConfig, NoiseInjector};
    pub use crewsim_runtime::orchestrator::{Orchestrator, OrchestratorConfig};
    pub use crewsim_runtime::persist::{append_result, read_results, write_results};
    pub use crewsim_runtime::pool::WorkerPool;
    pub use crewsim_runtime::telemetry::{LogRecorder, MemoryRecorder, NoopRecorder, SpanRecord};

    // Analysis
    pub use crewsim_analysis::prelude::*;

    // LLM integration (requires "llm" feature)
    #[cfg(feature = "llm")]
    pub use crewsim_llm::{LlmBackend, LlmConfig, LlmError, LlmPlanner, MockBackend, TaskGenerator};

    #[cfg(feature = "api")]
    pub use crewsim_llm::OpenAiBackend;

    #[cfg(feature = "api")]
    pub use crewsim_embeddings::{ApiConfig, ApiEmbedder};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
