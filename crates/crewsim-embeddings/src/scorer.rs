//! Description/artifact similarity scorer.

use crate::Embedder;
use crewsim_core::agent::SimilarityScorer;
use crewsim_core::text::{clean_artifact, clean_description};
use tracing::warn;

/// Scores alignment between a subtask description and a code artifact.
///
/// Before embedding, the artifact loses its comments and the description
/// loses every catalog ambiguity phrase; both get whitespace collapsed.
/// The result is the cosine similarity of the two embeddings, floored at 0.
///
/// This is a semantic heuristic, not a correctness check.
pub struct EmbeddingScorer<E> {
    embedder: E,
}

impl<E: Embedder> EmbeddingScorer<E> {
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    fn raw_score(&self, description: &str, artifact: &str) -> crate::EmbeddingResult<f32> {
        let vectors = self.embedder.embed_batch(&[description, artifact])?;
        match vectors.as_slice() {
            [a, b] => self.embedder.similarity(a, b),
            other => Err(crate::EmbeddingError::InvalidInput(format!(
                "expected 2 embeddings, got {}",
                other.len()
            ))),
        }
    }
}

impl<E: Embedder> SimilarityScorer for EmbeddingScorer<E> {
    fn score(&self, description: &str, artifact: &str) -> f64 {
        let description = clean_description(description);
        let artifact = clean_artifact(artifact);
        if description.is_empty() || artifact.is_empty() {
            return 0.0;
        }

        match self.raw_score(&description, &artifact) {
            Ok(sim) if sim.is_finite() => f64::from(sim).clamp(0.0, 1.0),
            Ok(sim) => {
                warn!(
                    model = self.embedder.model_name(),
                    similarity = %sim,
                    "non-finite similarity, scoring 0"
                );
                0.0
            }
            Err(e) => {
                warn!(
                    model = self.embedder.model_name(),
                    error = %e,
                    "similarity scoring failed, scoring 0"
                );
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmbeddingError, EmbeddingResult, SimpleEmbedder};

    fn scorer() -> EmbeddingScorer<SimpleEmbedder> {
        EmbeddingScorer::new(SimpleEmbedder::new(256))
    }

    #[test]
    fn identical_strings_score_one() {
        let s = scorer().score("create transaction handling", "create transaction handling");
        assert!((s - 1.0).abs() < 1e-3);
    }

    #[test]
    fn ambiguity_phrases_do_not_change_the_score() {
        let scorer = scorer();
        let code = "def login(user): token = oauth.exchange(user)\n    return token";
        let plain = scorer.score("Implement user login with OAuth", code);
        for phrase in crewsim_core::catalog::AMBIGUOUS_PHRASES {
            let noisy = scorer.score(&format!("Implement user login with OAuth {phrase}"), code);
            assert!((plain - noisy).abs() < 1e-9, "{phrase} shifted the score");
        }
    }

    #[test]
    fn comments_do_not_count_toward_alignment() {
        let scorer = scorer();
        let only_comment = "# integrate payment gateway";
        assert_eq!(scorer.score("Integrate payment gateway", only_comment), 0.0);
    }

    #[test]
    fn never_negative() {
        let scorer = scorer();
        let pairs = [
            ("alpha beta gamma", "delta epsilon zeta"),
            ("render chart", "return {'status': 'unimplemented'}"),
            ("cache queries", "raise NotImplementedError('Pending implementation')"),
        ];
        for (d, a) in pairs {
            let s = scorer.score(d, a);
            assert!((0.0..=1.0).contains(&s));
        }
    }

    struct BrokenEmbedder;

    impl Embedder for BrokenEmbedder {
        fn embed(&self, _text: &str) -> EmbeddingResult<Vec<f32>> {
            Err(EmbeddingError::ApiError("offline".into()))
        }

        fn dimension(&self) -> usize {
            8
        }

        fn model_name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn embedder_failure_scores_zero() {
        let scorer = EmbeddingScorer::new(BrokenEmbedder);
        assert_eq!(scorer.score("a task", "return 1"), 0.0);
    }

    struct NanEmbedder;

    impl Embedder for NanEmbedder {
        fn embed(&self, _text: &str) -> EmbeddingResult<Vec<f32>> {
            Ok(vec![f32::NAN, 1.0])
        }

        fn dimension(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "nan"
        }
    }

    #[test]
    fn nan_similarity_scores_zero() {
        let scorer = EmbeddingScorer::new(NanEmbedder);
        assert_eq!(scorer.score("a task", "return 1"), 0.0);
    }
}
