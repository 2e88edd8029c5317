//! Error types for crewsim operations.
//!
//! Only two conditions ever cross the orchestrator boundary: a pool with no
//! workers, and a misconfiguration caught before a run starts. Everything else
//! degrades into error-source tags inside the `TaskResult`.

use thiserror::Error;

/// Result type for crewsim operations.
pub type Result<T> = std::result::Result<T, CrewError>;

/// The role a worker pool is staffed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerRole {
    Coder,
    Reviewer,
}

impl std::fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerRole::Coder => write!(f, "coder"),
            WorkerRole::Reviewer => write!(f, "reviewer"),
        }
    }
}

/// Errors that can terminate a task run.
#[derive(Debug, Error)]
pub enum CrewError {
    /// No worker of the given role is available. Fatal, never retried.
    #[error("Pool exhausted: no {role} available")]
    PoolExhausted { role: WorkerRole },

    /// Configuration rejected before any work started.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl CrewError {
    pub fn pool_exhausted(role: WorkerRole) -> Self {
        CrewError::PoolExhausted { role }
    }

    /// Whether this error came from an empty worker pool.
    pub fn is_pool_exhausted(&self) -> bool {
        matches!(self, CrewError::PoolExhausted { .. })
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A numeric value outside its permitted range.
    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    /// A value that parses but makes no sense.
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    /// Check that a probability lies in `[0, 1]`.
    pub fn check_probability(field: &str, value: f64) -> std::result::Result<(), ConfigError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                field: field.to_string(),
                min: 0.0,
                max: 1.0,
                value,
            })
        }
    }
}

/// Why a planner could not produce a workflow.
///
/// The orchestrator never propagates these; it swaps in the keyword
/// fallback workflow and records the message on the planner span.
#[derive(Debug, Clone, Error)]
pub enum PlannerError {
    #[error("Planner backend unavailable: {0}")]
    Unavailable(String),

    #[error("Planner response could not be parsed: {0}")]
    InvalidResponse(String),
}
