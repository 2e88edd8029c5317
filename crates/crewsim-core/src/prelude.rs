//! Crewsim Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use crewsim_core::prelude::*;
//! ```

// Re-export data model
pub use crate::types::{SubtaskResult, TaskResult, Verdict, WorkflowStep};

// Re-export the role traits
pub use crate::agent::{Coder, Planner, Reviewer, SimilarityScorer};

// Re-export span hooks
pub use crate::span::{AttributeValue, SpanId, SpanRecorder};

// Re-export catalogs
pub use crate::catalog::{fallback_workflow, AMBIGUOUS_PHRASES, BAD_CODE_SNIPPETS, DEFAULT_TASKS};

// Re-export error types
pub use crate::error::{ConfigError, CrewError, PlannerError, Result, WorkerRole};
