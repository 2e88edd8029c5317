//! Configuration management for the crewsim CLI.

use anyhow::{Context, Result};
use crewsim::agents::reviewer::ReviewerConfig;
use crewsim::runtime::noise::NoiseConfig;
use crewsim::runtime::orchestrator::OrchestratorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "crewsim.toml";

/// crewsim project configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub noise: NoiseConfig,
    #[serde(default)]
    pub reviewer: ReviewerConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub llm: LlmSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_num_coders")]
    pub num_coders: usize,
    #[serde(default = "default_num_reviewers")]
    pub num_reviewers: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default = "default_planning_enabled")]
    pub planning_enabled: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    Simple,
    OpenAi,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_provider")]
    pub provider: EmbeddingProvider,
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    #[serde(default = "default_embedding_model")]
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSection {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,
}

// Default value functions
fn default_num_coders() -> usize { 2 }
fn default_num_reviewers() -> usize { 1 }
fn default_planning_enabled() -> bool { true }
fn default_output_dir() -> String { "results".to_string() }
fn default_provider() -> EmbeddingProvider { EmbeddingProvider::Simple }
fn default_dimension() -> usize { 256 }
fn default_embedding_model() -> String { "text-embedding-3-small".to_string() }
fn default_llm_model() -> String { "gpt-4o".to_string() }
fn default_temperature() -> f32 { 0.3 }
fn default_max_tokens() -> u32 { 300 }
fn default_timeout_secs() -> u32 { 30 }

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_coders: default_num_coders(),
            num_reviewers: default_num_reviewers(),
            seed: None,
            planning_enabled: default_planning_enabled(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            dimension: default_dimension(),
            model: default_embedding_model(),
        }
    }
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            enabled: false,
            model: default_llm_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from crewsim.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        self.noise.validate()?;
        self.reviewer.validate()?;
        if self.embedding.dimension == 0 {
            anyhow::bail!("embedding.dimension must be positive");
        }
        Ok(())
    }

    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            planning_enabled: self.simulation.planning_enabled,
            noise: self.noise,
        }
    }
}

/// Find crewsim.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toml_round_trips() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[simulation]"));
        assert!(text.contains("p_ambiguity = 0.3"));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [simulation]
            seed = 7

            [noise]
            p_bad_code = 0.5

            [embedding]
            provider = "openai"
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.num_coders, 2);
        assert_eq!(config.noise.p_ambiguity, 0.3);
        assert_eq!(config.noise.p_bad_code, 0.5);
        assert_eq!(config.embedding.provider, EmbeddingProvider::OpenAi);
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn out_of_range_probability_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[noise]\np_ambiguity = 1.5\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
