//! Synthetic feature-request generator.

use crate::backend::LlmBackend;
use crate::prompt::{FeatureRequestPrompt, PromptTemplate};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

/// Categories a generated feature request is drawn from.
pub const TASK_TYPES: [&str; 8] = [
    "authentication system",
    "payment processing",
    "user profile management",
    "data storage solution",
    "API endpoint",
    "security feature",
    "notification service",
    "performance optimization",
];

/// Hand-written requests used when the model is unavailable.
pub const FALLBACK_FEATURES: [&str; 6] = [
    "Implement JWT-based authentication with refresh tokens",
    "Create Stripe integration for recurring payments",
    "Add user profile picture upload with S3 storage",
    "Implement Redis caching for database queries",
    "Add rate limiting to API endpoints",
    "Create audit logging for security-sensitive operations",
];

/// Writes backend feature requests for a simulation run.
pub struct TaskGenerator<B> {
    backend: Option<B>,
    temperature: f32,
    max_tokens: u32,
}

impl<B: LlmBackend> TaskGenerator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Some(backend),
            temperature: 0.7,
            max_tokens: 100,
        }
    }

    /// A generator that only draws from [`FALLBACK_FEATURES`].
    pub fn offline() -> Self {
        Self {
            backend: None,
            temperature: 0.7,
            max_tokens: 100,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Generate one feature request.
    pub fn generate_task<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let task_type = TASK_TYPES.choose(rng).copied().unwrap_or(TASK_TYPES[0]);

        if let Some(backend) = &self.backend {
            let request = FeatureRequestPrompt::new(task_type)
                .to_request()
                .with_temperature(self.temperature)
                .with_max_tokens(self.max_tokens);
            match backend.complete(&request) {
                Ok(text) if !text.trim().is_empty() => return text.trim().to_string(),
                Ok(_) => warn!(backend = backend.name(), "empty feature request, using fallback"),
                Err(e) => warn!(
                    backend = backend.name(),
                    error = %e,
                    "task generation failed, using fallback"
                ),
            }
        }

        manual_task(rng)
    }

    /// Generate `count` feature requests.
    pub fn generate_batch<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<String> {
        (0..count).map(|_| self.generate_task(rng)).collect()
    }
}

fn manual_task<R: Rng + ?Sized>(rng: &mut R) -> String {
    FALLBACK_FEATURES
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_FEATURES[0])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn uses_model_output_when_available() {
        let backend = MockBackend::new()
            .with_default_response("  Add webhook retries with exponential backoff.\n");
        let generator = TaskGenerator::new(backend);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            generator.generate_task(&mut rng),
            "Add webhook retries with exponential backoff."
        );
    }

    #[test]
    fn falls_back_on_failure() {
        let generator = TaskGenerator::new(MockBackend::failing("offline"));
        let mut rng = StdRng::seed_from_u64(7);
        for task in generator.generate_batch(20, &mut rng) {
            assert!(FALLBACK_FEATURES.contains(&task.as_str()));
        }
    }

    #[test]
    fn offline_generator_is_seed_reproducible() {
        let generator = TaskGenerator::<MockBackend>::offline();
        let a = generator.generate_batch(5, &mut StdRng::seed_from_u64(3));
        let b = generator.generate_batch(5, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
