//! Property tests: task-result invariants hold for any seed and noise level.

use crewsim_agents::prelude::*;
use crewsim_embeddings::{EmbeddingScorer, SimpleEmbedder};
use crewsim_runtime::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn orchestrator(p_ambiguity: f64, p_bad_code: f64) -> Orchestrator {
    let config = OrchestratorConfig {
        planning_enabled: true,
        noise: NoiseConfig {
            p_ambiguity,
            p_bad_code,
        },
    };
    let pool = WorkerPool::empty()
        .with_coder(TemplateCoder)
        .with_coder(CannedCoder::default())
        .with_coder(EchoCoder)
        .with_reviewer(HeuristicReviewer::default())
        .with_reviewer(LengthReviewer::default());
    Orchestrator::new(
        config,
        KeywordPlanner,
        pool,
        EmbeddingScorer::new(SimpleEmbedder::new(128)),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn result_invariants(
        seed in any::<u64>(),
        p_ambiguity in 0.0f64..=1.0,
        p_bad_code in 0.0f64..=1.0,
        task in "[A-Za-z ]{1,40}",
    ) {
        let orchestrator = orchestrator(p_ambiguity, p_bad_code);
        let mut rng = StdRng::seed_from_u64(seed);
        let result = orchestrator.run_task(&task, &mut rng).unwrap();

        prop_assert_eq!(result.workflow().len(), result.subtask_results().len());
        for (description, subtask) in result.workflow().iter().zip(result.subtask_results()) {
            prop_assert_eq!(description, &subtask.subtask);
            prop_assert!((0.0..=1.0).contains(&subtask.similarity));
        }

        let n = result.subtask_results().len();
        let mean = if n == 0 {
            0.0
        } else {
            result.subtask_results().iter().map(|s| s.similarity).sum::<f64>() / n as f64
        };
        prop_assert!((result.similarity() - mean).abs() < 1e-9);
        prop_assert_eq!(result.errors(), result.error_sources().len());

        let synthetic = result
            .error_sources()
            .iter()
            .filter(|t| t.as_str() == "synthetic_ambiguity")
            .count();
        prop_assert!(synthetic <= 1);
        prop_assert_eq!(synthetic == 1, result.task() != result.original_task());
    }

    #[test]
    fn metrics_rates_stay_in_unit_interval(seed in any::<u64>(), count in 0usize..6) {
        let orchestrator = orchestrator(0.3, 0.1);
        let mut rng = StdRng::seed_from_u64(seed);
        let tasks: Vec<String> = (0..count).map(|i| format!("Add payment endpoint {i}")).collect();
        let results = completed_results(run_batch(&orchestrator, &tasks, &mut rng));
        let metrics = summarize(&results);

        prop_assert_eq!(metrics.task_count, count);
        for rate in [metrics.approval_rate, metrics.mean_similarity, metrics.error_incidence_rate] {
            prop_assert!((0.0..=1.0).contains(&rate));
        }
    }
}
