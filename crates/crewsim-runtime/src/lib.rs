//! # Crewsim Runtime
//!
//! The task-execution pipeline and everything around it.
//!
//! The [`Orchestrator`](orchestrator::Orchestrator) takes a task through
//! ambiguity injection, planning, and a per-subtask loop of worker selection,
//! code generation, corruption, similarity scoring and review. The outcome is
//! a frozen `TaskResult`. Spans go to a pluggable recorder. Results are
//! summarized into run metrics and persisted as JSON Lines.

pub mod batch;
pub mod metrics;
pub mod noise;
pub mod orchestrator;
pub mod persist;
pub mod pool;
pub mod prelude;
pub mod telemetry;
