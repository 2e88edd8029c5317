//! # Crewsim Embeddings
//!
//! Embedding backends and the similarity scorer for crewsim.
//!
//! The scorer answers one question per subtask: does the generated artifact
//! plausibly address its description? It cleans both strings, embeds them
//! and reports the cosine similarity floored at zero.
//!
//! ## Features
//!
//! - `api`: OpenAI-compatible remote embeddings
//!
//! ## Usage
//!
//! ```rust
//! use crewsim_core::agent::SimilarityScorer;
//! use crewsim_embeddings::{EmbeddingScorer, SimpleEmbedder};
//!
//! let scorer = EmbeddingScorer::new(SimpleEmbedder::new(256));
//! let score = scorer.score("validate user input", "def validate_user_input(data): return data");
//! assert!((0.0..=1.0).contains(&score));
//! ```

mod embedder;
mod normalize;
mod scorer;
mod simple;

pub use embedder::{Embedder, EmbeddingError, EmbeddingResult};
pub use normalize::{cosine_similarity, normalize_l2};
pub use scorer::EmbeddingScorer;
pub use simple::SimpleEmbedder;

#[cfg(feature = "api")]
mod api;
#[cfg(feature = "api")]
pub use api::{ApiConfig, ApiEmbedder};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cosine_similarity, normalize_l2};
    pub use crate::{Embedder, EmbeddingError, EmbeddingResult};
    pub use crate::{EmbeddingScorer, SimpleEmbedder};

    #[cfg(feature = "api")]
    pub use crate::{ApiConfig, ApiEmbedder};
}
