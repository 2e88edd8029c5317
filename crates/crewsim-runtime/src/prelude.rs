//! Crewsim Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use crewsim_runtime::prelude::*;
//! ```

pub use crate::batch::{completed_results, run_batch, run_batch_with, TaskOutcome};
pub use crate::metrics::{summarize, RunMetrics};
pub use crate::noise::{NoiseConfig, NoiseInjector};
pub use crate::orchestrator::{Orchestrator, OrchestratorConfig, TaskStage};
pub use crate::persist::{append_result, read_results, write_results, PersistError};
pub use crate::pool::{Assignment, WorkerPool};
pub use crate::telemetry::{LogRecorder, MemoryRecorder, NoopRecorder, SpanRecord};

// Re-export from core
pub use crewsim_core::prelude::*;
