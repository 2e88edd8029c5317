//! JSONL round trips through the filesystem.

use crewsim_agents::prelude::*;
use crewsim_embeddings::{EmbeddingScorer, SimpleEmbedder};
use crewsim_runtime::persist::{read_jsonl, write_jsonl};
use crewsim_runtime::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tempfile::TempDir;

fn run(tasks: &[&str], recorder: Arc<MemoryRecorder>) -> Vec<TaskResult> {
    let pool = WorkerPool::empty()
        .with_coder(TemplateCoder)
        .with_reviewer(HeuristicReviewer::default());
    let orchestrator = Orchestrator::new(
        OrchestratorConfig::default(),
        KeywordPlanner,
        pool,
        EmbeddingScorer::new(SimpleEmbedder::default()),
    )
    .unwrap()
    .with_recorder(recorder);
    let mut rng = StdRng::seed_from_u64(21);
    completed_results(run_batch(&orchestrator, tasks, &mut rng))
}

#[test]
fn results_survive_write_and_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("full_results.jsonl");
    let results = run(
        &["Implement user login with OAuth", "Add payment processing system"],
        Arc::new(MemoryRecorder::new()),
    );

    write_results(&path, &results).unwrap();
    let loaded = read_results(&path).unwrap();
    assert_eq!(loaded, results);

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn append_adds_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("full_results.jsonl");
    let results = run(&["Fix security vulnerability"], Arc::new(MemoryRecorder::new()));

    append_result(&path, &results[0]).unwrap();
    append_result(&path, &results[0]).unwrap();
    assert_eq!(read_results(&path).unwrap().len(), 2);
}

#[test]
fn span_dump_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spans.jsonl");
    let recorder = Arc::new(MemoryRecorder::new());
    run(&["Implement authentication"], recorder.clone());

    let spans = recorder.drain();
    write_jsonl(&path, &spans).unwrap();
    let loaded: Vec<SpanRecord> = read_jsonl(&path).unwrap();
    assert_eq!(loaded, spans);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_results(&dir.path().join("absent.jsonl")).unwrap_err();
    assert!(matches!(err, PersistError::Io(_)));
}
