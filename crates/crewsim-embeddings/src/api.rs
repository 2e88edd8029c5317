//! Remote embeddings over an OpenAI-compatible `/v1/embeddings` endpoint.
//!
//! Requires the `api` feature.

use crate::{Embedder, EmbeddingError, EmbeddingResult};
use serde::{Deserialize, Serialize};

const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

/// Configuration for API-based embeddings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Endpoint; defaults to OpenAI.
    pub endpoint: String,
    /// Requested embedding dimension, for models that support truncation.
    pub dimensions: Option<usize>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// OpenAI `text-embedding-3-small`.
    pub fn openai(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: "text-embedding-3-small".to_string(),
            endpoint: OPENAI_EMBEDDINGS_URL.to_string(),
            dimensions: None,
            timeout_secs: 30,
        }
    }

    /// Read the key from `OPENAI_API_KEY`.
    pub fn from_env() -> EmbeddingResult<Self> {
        let key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| EmbeddingError::ApiError("OPENAI_API_KEY is not set".to_string()))?;
        Ok(Self::openai(&key))
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

/// Blocking client for remote embeddings.
///
/// # Example
///
/// ```rust,ignore
/// use crewsim_embeddings::{ApiConfig, ApiEmbedder, EmbeddingScorer};
///
/// let embedder = ApiEmbedder::new(ApiConfig::from_env()?)?;
/// let scorer = EmbeddingScorer::new(embedder);
/// ```
pub struct ApiEmbedder {
    config: ApiConfig,
    client: reqwest::blocking::Client,
}

impl ApiEmbedder {
    pub fn new(config: ApiConfig) -> EmbeddingResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::ApiError(e.to_string()))?;

        Ok(Self { config, client })
    }
}

impl Embedder for ApiEmbedder {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        self.embed_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::ApiError("No embedding returned".to_string()))
    }

    fn embed_batch(&self, texts: &[&str]) -> EmbeddingResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let request = EmbeddingRequest {
            model: &self.config.model,
            input: texts.to_vec(),
            dimensions: self.config.dimensions,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .map_err(|e| EmbeddingError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::ApiError(format!(
                "Embeddings API error {}: {}",
                status, body
            )));
        }

        let mut resp: EmbeddingResponse = response
            .json()
            .map_err(|e| EmbeddingError::ApiError(e.to_string()))?;

        if resp.data.len() != texts.len() {
            return Err(EmbeddingError::ApiError(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                resp.data.len()
            )));
        }
        resp.data.sort_by_key(|item| item.index);
        Ok(resp.data.into_iter().map(|item| item.embedding).collect())
    }

    fn dimension(&self) -> usize {
        self.config.dimensions.unwrap_or(1536)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_chaining() {
        let config = ApiConfig::openai("key")
            .with_model("text-embedding-3-large")
            .with_dimensions(512)
            .with_endpoint("http://localhost:8080/v1/embeddings")
            .with_timeout(5);

        assert_eq!(config.model, "text-embedding-3-large");
        assert_eq!(config.dimensions, Some(512));
        assert!(config.endpoint.starts_with("http://localhost"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn request_omits_unset_dimensions() {
        let request = EmbeddingRequest {
            model: "m",
            input: vec!["a"],
            dimensions: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("dimensions").is_none());
    }
}
