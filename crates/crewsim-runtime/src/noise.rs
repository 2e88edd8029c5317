//! Noise injection: synthetic ambiguity on tasks, canned bad code on artifacts.

use crewsim_core::catalog::{AMBIGUOUS_PHRASES, BAD_CODE_SNIPPETS};
use crewsim_core::error::ConfigError;
use crewsim_core::text::contains_ambiguity;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Noise probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Chance of appending an ambiguity phrase to a task.
    pub p_ambiguity: f64,
    /// Chance, per subtask, of replacing the artifact with a bad snippet.
    pub p_bad_code: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            p_ambiguity: 0.3,
            p_bad_code: 0.1,
        }
    }
}

impl NoiseConfig {
    /// No noise at all.
    pub fn disabled() -> Self {
        Self {
            p_ambiguity: 0.0,
            p_bad_code: 0.0,
        }
    }

    pub fn with_ambiguity(mut self, p: f64) -> Self {
        self.p_ambiguity = p;
        self
    }

    pub fn with_bad_code(mut self, p: f64) -> Self {
        self.p_bad_code = p;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_probability("noise.p_ambiguity", self.p_ambiguity)?;
        ConfigError::check_probability("noise.p_bad_code", self.p_bad_code)
    }
}

/// Applies [`NoiseConfig`] with a caller-supplied random source.
#[derive(Debug, Clone)]
pub struct NoiseInjector {
    config: NoiseConfig,
}

impl NoiseInjector {
    /// Fails if either probability lies outside `[0, 1]`.
    pub fn new(config: NoiseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Possibly append one ambiguity phrase. Returns the task and whether it changed.
    pub fn maybe_make_ambiguous<R: Rng + ?Sized>(&self, task: &str, rng: &mut R) -> (String, bool) {
        if !rng.gen_bool(self.config.p_ambiguity) {
            return (task.to_string(), false);
        }
        match AMBIGUOUS_PHRASES.choose(rng) {
            Some(phrase) => (format!("{task} {phrase}"), true),
            None => (task.to_string(), false),
        }
    }

    /// Whether the task already contains a catalog ambiguity phrase.
    pub fn detect_natural_ambiguity(&self, task: &str) -> bool {
        contains_ambiguity(task)
    }

    /// Possibly replace the artifact wholesale with a canned bad snippet.
    pub fn maybe_corrupt<R: Rng + ?Sized>(&self, code: String, rng: &mut R) -> (String, bool) {
        if !rng.gen_bool(self.config.p_bad_code) {
            return (code, false);
        }
        match BAD_CODE_SNIPPETS.choose(rng) {
            Some(snippet) => (snippet.to_string(), true),
            None => (code, false),
        }
    }
}

impl Default for NoiseInjector {
    fn default() -> Self {
        Self {
            config: NoiseConfig::default(),
        }
    }
}
