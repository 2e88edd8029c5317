//! Orchestrator driven by the LLM planner over a mock backend.
#![cfg(feature = "llm")]

use crewsim::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn quiet() -> OrchestratorConfig {
    OrchestratorConfig {
        planning_enabled: true,
        noise: NoiseConfig::disabled(),
    }
}

fn pool() -> WorkerPool {
    WorkerPool::empty()
        .with_coder(TemplateCoder)
        .with_reviewer(HeuristicReviewer::default())
}

fn scorer() -> EmbeddingScorer<SimpleEmbedder> {
    EmbeddingScorer::new(SimpleEmbedder::default())
}

#[test]
fn model_workflow_is_used() {
    let backend = MockBackend::new().with_default_response(
        "```json\n{\"subtasks\": [\"Design rate limit store\", \"Write rate limit middleware\"]}\n```",
    );
    let orchestrator =
        Orchestrator::new(quiet(), LlmPlanner::new(backend), pool(), scorer()).unwrap();

    let result = orchestrator
        .run_task("Add rate limiting to the API", &mut StdRng::seed_from_u64(3))
        .unwrap();
    assert_eq!(
        result.workflow(),
        ["Design rate limit store", "Write rate limit middleware"]
    );
    assert_eq!(result.errors(), 0);
}

#[test]
fn structured_steps_are_coerced_and_tagged() {
    let backend = MockBackend::new()
        .with_default_response(r#"{"subtasks": ["Design schema", {"step": "Write handler"}]}"#);
    let orchestrator =
        Orchestrator::new(quiet(), LlmPlanner::new(backend), pool(), scorer()).unwrap();

    let result = orchestrator
        .run_task("Build a notification service", &mut StdRng::seed_from_u64(3))
        .unwrap();
    assert_eq!(result.workflow()[1], r#"{"step":"Write handler"}"#);
    assert_eq!(result.error_sources(), ["subtask_2_type_conversion"]);
}

#[test]
fn unreachable_model_falls_back() {
    let recorder = Arc::new(MemoryRecorder::new());
    let planner = LlmPlanner::new(MockBackend::failing("connection refused"));
    let orchestrator = Orchestrator::new(quiet(), planner, pool(), scorer())
        .unwrap()
        .with_recorder(recorder.clone());

    let result = orchestrator
        .run_task("Add payment processing system", &mut StdRng::seed_from_u64(3))
        .unwrap();
    assert_eq!(
        result.workflow(),
        [
            "Integrate payment gateway",
            "Create transaction handling",
            "Implement reconciliation"
        ]
    );

    let spans = recorder.spans();
    let planner_span = spans.iter().find(|s| s.name == "planner.decompose").unwrap();
    assert_eq!(planner_span.errors.len(), 1);
}

#[test]
fn generated_tasks_run_through_the_pipeline() {
    let mut rng = StdRng::seed_from_u64(11);
    let tasks = TaskGenerator::<MockBackend>::offline().generate_batch(3, &mut rng);
    assert_eq!(tasks.len(), 3);

    let orchestrator = crewsim::default_orchestrator(OrchestratorConfig::default()).unwrap();
    let outcomes = run_batch(&orchestrator, &tasks, &mut rng);
    assert!(outcomes.iter().all(TaskOutcome::is_completed));

    let metrics = summarize(&completed_results(outcomes));
    assert_eq!(metrics.task_count, 3);
}
