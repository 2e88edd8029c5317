//! Reviewer agents.
//!
//! Reviews look at the artifact as the scorer does, with comments stripped
//! and whitespace collapsed, so a file that is nothing but a `# TODO` line
//! counts as empty.

use crewsim_core::agent::Reviewer;
use crewsim_core::error::ConfigError;
use crewsim_core::text::clean_artifact;
use crewsim_core::types::Verdict;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Substrings that mark an artifact as unfinished.
pub const DEFAULT_BANNED_PATTERNS: [&str; 6] = [
    "todo",
    "fixme",
    "notimplementederror",
    "placeholder",
    "unimplemented",
    "to be completed",
];

/// Configuration for [`HeuristicReviewer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewerConfig {
    /// Artifacts whose cleaned length is at or below this are rejected.
    pub min_length: usize,
    /// Case-insensitive substrings that reject an artifact outright.
    pub banned_patterns: Vec<String>,
    /// Require a `return` token or an assignment.
    pub require_statement: bool,
}

impl Default for ReviewerConfig {
    fn default() -> Self {
        Self {
            min_length: 10,
            banned_patterns: DEFAULT_BANNED_PATTERNS.iter().map(|p| p.to_string()).collect(),
            require_statement: true,
        }
    }
}

impl ReviewerConfig {
    /// Reject blank banned patterns, which would match every artifact.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(blank) = self.banned_patterns.iter().find(|p| p.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "reviewer.banned_patterns".to_string(),
                value: format!("{blank:?}"),
                reason: "pattern must not be blank".to_string(),
            });
        }
        Ok(())
    }
}

/// Lint-like reviewer: length threshold, banned patterns, statement presence.
#[derive(Debug, Clone)]
pub struct HeuristicReviewer {
    min_length: usize,
    banned: Vec<String>,
    require_statement: bool,
}

impl HeuristicReviewer {
    pub fn new(config: ReviewerConfig) -> Self {
        Self {
            min_length: config.min_length,
            banned: config
                .banned_patterns
                .into_iter()
                .map(|p| p.to_lowercase())
                .collect(),
            require_statement: config.require_statement,
        }
    }

    fn has_statement(code: &str) -> bool {
        let has_return = code
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .any(|token| token == "return");
        has_return || has_assignment(code)
    }
}

impl Default for HeuristicReviewer {
    fn default() -> Self {
        Self::new(ReviewerConfig::default())
    }
}

impl Reviewer for HeuristicReviewer {
    fn review(&self, code: &str) -> Verdict {
        let cleaned = clean_artifact(code);
        if cleaned.chars().count() <= self.min_length {
            trace!(min_length = self.min_length, "rejected: artifact too short");
            return Verdict::Rejected;
        }

        let lower = code.to_lowercase();
        if let Some(pattern) = self.banned.iter().find(|p| lower.contains(p.as_str())) {
            trace!(pattern = %pattern, "rejected: banned pattern");
            return Verdict::Rejected;
        }

        if self.require_statement && !Self::has_statement(&cleaned) {
            trace!("rejected: no assignment or return");
            return Verdict::Rejected;
        }

        Verdict::Approved
    }
}

/// Approves anything longer than a threshold.
#[derive(Debug, Clone, Copy)]
pub struct LengthReviewer {
    min_length: usize,
}

impl LengthReviewer {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Default for LengthReviewer {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Reviewer for LengthReviewer {
    fn review(&self, code: &str) -> Verdict {
        Verdict::from_approved(clean_artifact(code).chars().count() > self.min_length)
    }
}

/// A bare `=` that is not part of `==`, `!=`, `<=`, `>=` or `=>`.
fn has_assignment(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        if b != b'=' {
            return false;
        }
        let prev = i.checked_sub(1).map(|j| bytes[j]);
        let next = bytes.get(i + 1).copied();
        !matches!(prev, Some(b'=' | b'!' | b'<' | b'>')) && !matches!(next, Some(b'=' | b'>'))
    })
}
