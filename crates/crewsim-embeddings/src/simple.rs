//! Hash-based embedder (no model download, no network).
//!
//! Words are hashed into a fixed-dimension signed feature space. Code
//! identifiers are split on `snake_case` and `camelCase` boundaries first, so
//! `validateUserInput` and "validate user input" land on the same features.
//! Not as semantically rich as a neural model, but deterministic and
//! fast enough to score every subtask of a long simulation.

use crate::{Embedder, EmbeddingError, EmbeddingResult};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hash-based embedder.
///
/// # Example
///
/// ```rust
/// use crewsim_embeddings::{Embedder, SimpleEmbedder};
///
/// let embedder = SimpleEmbedder::new(128);
/// let vec = embedder.embed("handle payment webhook").unwrap();
/// assert_eq!(vec.len(), 128);
/// ```
pub struct SimpleEmbedder {
    dimension: usize,
    num_hashes: usize,
}

impl SimpleEmbedder {
    /// Create a new embedder with the given dimension (at least 1).
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
            num_hashes: 4,
        }
    }

    /// Create with default dimension (256).
    pub fn default_dimension() -> Self {
        Self::new(256)
    }

    /// Split text into lowercase word tokens, breaking identifiers apart.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for raw in text.split(|c: char| !c.is_alphanumeric()) {
            for part in split_camel_case(raw) {
                let token = part.to_lowercase();
                if token.chars().count() > 1 {
                    tokens.push(token);
                }
            }
        }
        tokens
    }

    fn hash_with_seed(&self, word: &str, seed: u64) -> usize {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        word.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }

    fn sign_hash(&self, word: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        (seed + 1000).hash(&mut hasher);
        word.hash(&mut hasher);
        if hasher.finish() % 2 == 0 { 1.0 } else { -1.0 }
    }
}

/// `validateUserInput` → `validate`, `User`, `Input`. Acronym runs stay together.
fn split_camel_case(word: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev_lower = false;
    for (i, c) in word.char_indices() {
        if c.is_uppercase() && prev_lower && i > start {
            parts.push(&word[start..i]);
            start = i;
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    if start < word.len() {
        parts.push(&word[start..]);
    }
    parts
}

impl Default for SimpleEmbedder {
    fn default() -> Self {
        Self::default_dimension()
    }
}

impl Embedder for SimpleEmbedder {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput("Empty text".to_string()));
        }

        let tokens = self.tokenize(text);
        let mut vector = vec![0.0f32; self.dimension];
        if tokens.is_empty() {
            return Ok(vector);
        }

        for token in &tokens {
            for seed in 0..self.num_hashes as u64 {
                let idx = self.hash_with_seed(token, seed);
                vector[idx] += self.sign_hash(token, seed);
            }
        }

        crate::normalize_l2(&mut vector);
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "simple-hash"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_is_maximally_similar() {
        let embedder = SimpleEmbedder::new(128);
        let v1 = embedder.embed("integrate payment gateway").unwrap();
        let v2 = embedder.embed("integrate payment gateway").unwrap();
        let sim = embedder.similarity(&v1, &v2).unwrap();
        assert!((sim - 1.0).abs() < 0.001);
    }

    #[test]
    fn related_text_beats_unrelated() {
        let embedder = SimpleEmbedder::new(256);
        let task = embedder.embed("validate user input").unwrap();
        let code = embedder
            .embed("def validate_user_input(data): return data")
            .unwrap();
        let other = embedder.embed("quantum telescope orbit").unwrap();

        let related = embedder.similarity(&task, &code).unwrap();
        let unrelated = embedder.similarity(&task, &other).unwrap();
        assert!(related > unrelated);
    }

    #[test]
    fn camel_case_identifiers_split() {
        assert_eq!(split_camel_case("validateUserInput"), vec!["validate", "User", "Input"]);
        assert_eq!(split_camel_case("HTTPServer"), vec!["HTTPServer"]);
        assert_eq!(split_camel_case("plain"), vec!["plain"]);
    }

    #[test]
    fn empty_text_is_rejected() {
        let embedder = SimpleEmbedder::default();
        assert!(embedder.embed("   ").is_err());
        let punctuation = embedder.embed("{ } ;").unwrap();
        assert!(punctuation.iter().all(|v| *v == 0.0));
    }
}
