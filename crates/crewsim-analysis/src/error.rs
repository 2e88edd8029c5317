//! Error types for trace analysis.

use crewsim_runtime::persist::PersistError;
use thiserror::Error;

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to load input: {0}")]
    Load(#[from] PersistError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    pub(crate) fn write(path: &std::path::Path, source: std::io::Error) -> Self {
        AnalysisError::Write {
            path: path.display().to_string(),
            source,
        }
    }
}
