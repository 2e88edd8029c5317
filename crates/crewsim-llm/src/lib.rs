//! # Crewsim LLM
//!
//! Language-model collaborators for crewsim.
//!
//! - [`LlmPlanner`] decomposes a task into 2–4 subtasks through a chat model
//!   and plugs into the orchestrator as a `Planner`.
//! - [`TaskGenerator`] writes synthetic backend feature requests, falling back
//!   to a fixed list when the model is unreachable.
//!
//! Backends are blocking: the pipeline is sequential and the planner call is
//! the only point where it waits.
//!
//! ## Features
//!
//! - `api`: OpenAI-compatible chat completions backend
//!
//! ## Usage
//!
//! ```rust
//! use crewsim_core::agent::Planner;
//! use crewsim_llm::{LlmPlanner, MockBackend};
//!
//! let backend = MockBackend::new()
//!     .with_response("Decompose", r#"{"subtasks": ["Design schema", "Write handler"]}"#);
//! let planner = LlmPlanner::new(backend);
//! let steps = planner.decompose("Add rate limiting").unwrap();
//! assert_eq!(steps.len(), 2);
//! ```

mod backend;
mod generator;
mod planner;
mod prompt;

pub use backend::{CompletionRequest, LlmBackend, LlmConfig, LlmError, LlmResult, MockBackend};
pub use generator::{TaskGenerator, FALLBACK_FEATURES, TASK_TYPES};
pub use planner::{parse_subtasks, LlmPlanner};
pub use prompt::{extract_json_object, DecomposePrompt, FeatureRequestPrompt, PromptTemplate};

#[cfg(feature = "api")]
mod openai;
#[cfg(feature = "api")]
pub use openai::OpenAiBackend;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{LlmBackend, LlmConfig, LlmError, LlmResult, MockBackend};
    pub use crate::{LlmPlanner, TaskGenerator};
    pub use crate::{DecomposePrompt, FeatureRequestPrompt, PromptTemplate};

    #[cfg(feature = "api")]
    pub use crate::OpenAiBackend;
}
