//! Task orchestrator: drives one task through the pipeline.
//!
//! Received → Ambiguated → Decomposed → SubtaskLoop(1..=N) → Aggregated → Done
//!
//! Per subtask: select workers, generate code, maybe corrupt it, score the
//! artifact against the description, review it. Only an unstaffed pool can
//! fail a run; everything else degrades into error-source tags.

use crate::noise::{NoiseConfig, NoiseInjector};
use crate::pool::WorkerPool;
use crate::telemetry::NoopRecorder;
use crewsim_core::agent::{Planner, SimilarityScorer};
use crewsim_core::catalog::{
    bad_code_tag, fallback_workflow, type_conversion_tag, NATURAL_AMBIGUITY, SYNTHETIC_AMBIGUITY,
};
use crewsim_core::error::{CrewError, Result, WorkerRole};
use crewsim_core::span::{SpanId, SpanRecorder};
use crewsim_core::types::{SubtaskResult, TaskResult, WorkflowStep};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Ask the planner for a workflow. When off, the task is its own single subtask.
    pub planning_enabled: bool,
    pub noise: NoiseConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            planning_enabled: true,
            noise: NoiseConfig::default(),
        }
    }
}

/// Where a task run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStage {
    Received,
    Ambiguated,
    Decomposed,
    SubtaskLoop(usize),
    Aggregated,
    Done,
}

impl std::fmt::Display for TaskStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStage::Received => write!(f, "received"),
            TaskStage::Ambiguated => write!(f, "ambiguated"),
            TaskStage::Decomposed => write!(f, "decomposed"),
            TaskStage::SubtaskLoop(i) => write!(f, "subtask {i}"),
            TaskStage::Aggregated => write!(f, "aggregated"),
            TaskStage::Done => write!(f, "done"),
        }
    }
}

/// Runs tasks against a planner, a worker pool and a similarity scorer.
///
/// Takes `&self` everywhere; one orchestrator can serve concurrent runs as
/// long as each run brings its own random source.
pub struct Orchestrator {
    planner: Box<dyn Planner>,
    pool: WorkerPool,
    scorer: Box<dyn SimilarityScorer>,
    recorder: Arc<dyn SpanRecorder>,
    noise: NoiseInjector,
    planning_enabled: bool,
}

impl Orchestrator {
    /// Build an orchestrator. Fails on invalid noise probabilities.
    pub fn new(
        config: OrchestratorConfig,
        planner: impl Planner + 'static,
        pool: WorkerPool,
        scorer: impl SimilarityScorer + 'static,
    ) -> Result<Self> {
        let noise = NoiseInjector::new(config.noise)?;
        Ok(Self {
            planner: Box::new(planner),
            pool,
            scorer: Box::new(scorer),
            recorder: Arc::new(NoopRecorder),
            noise,
            planning_enabled: config.planning_enabled,
        })
    }

    /// Report spans to `recorder` instead of dropping them.
    pub fn with_recorder(mut self, recorder: Arc<dyn SpanRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn noise(&self) -> &NoiseInjector {
        &self.noise
    }

    pub fn planning_enabled(&self) -> bool {
        self.planning_enabled
    }

    /// Run one task to completion.
    ///
    /// Fails only with [`CrewError::PoolExhausted`], before any work starts.
    pub fn run_task(&self, task: &str, rng: &mut dyn RngCore) -> Result<TaskResult> {
        self.pool.ensure_staffed()?;

        let root = self.recorder.start_span("task.run", None);
        let outcome = self.execute(task, root, rng);
        if let Err(e) = &outcome {
            self.recorder.record_error(root, &e.to_string());
        }
        self.recorder.end_span(root);
        outcome
    }

    fn execute(&self, task: &str, root: SpanId, rng: &mut dyn RngCore) -> Result<TaskResult> {
        stage(TaskStage::Received, task);
        let mut error_sources = Vec::new();

        let (assigned, synthetic) = self.noise.maybe_make_ambiguous(task, rng);
        if synthetic {
            error_sources.push(SYNTHETIC_AMBIGUITY.to_string());
        }
        let natural = self.noise.detect_natural_ambiguity(&assigned);
        if natural {
            error_sources.push(NATURAL_AMBIGUITY.to_string());
        }
        self.recorder.set_attribute(root, "task.original", task.into());
        self.recorder.set_attribute(root, "task.assigned", assigned.as_str().into());
        self.recorder.set_attribute(root, "task.synthetic_ambiguity", synthetic.into());
        self.recorder.set_attribute(root, "task.natural_ambiguity", natural.into());
        stage(TaskStage::Ambiguated, &assigned);

        let (steps, fallback) = self.plan(&assigned, root);
        let descriptions: Vec<(String, bool)> =
            steps.into_iter().map(WorkflowStep::into_description).collect();
        let workflow: Vec<String> = descriptions.iter().map(|(d, _)| d.clone()).collect();
        self.recorder.set_attribute(root, "workflow.subtasks", json_list(&workflow).into());
        self.recorder.set_attribute(root, "workflow.fallback", fallback.into());
        stage(TaskStage::Decomposed, &assigned);

        let mut subtask_results = Vec::with_capacity(descriptions.len());
        for (offset, (description, coerced)) in descriptions.into_iter().enumerate() {
            let index = offset + 1;
            stage(TaskStage::SubtaskLoop(index), &description);
            if coerced {
                error_sources.push(type_conversion_tag(index));
            }
            let result = self.run_subtask(index, description, root, &mut error_sources, rng)?;
            subtask_results.push(result);
        }

        let result = TaskResult::assemble(task, assigned, workflow, subtask_results, error_sources);
        stage(TaskStage::Aggregated, result.task());

        self.recorder.set_attribute(root, "task.avg_similarity", result.similarity().into());
        self.recorder.set_attribute(root, "task.errors", result.errors().into());
        self.recorder
            .set_attribute(root, "task.error_sources", result.error_sources().join(",").into());
        self.recorder.set_attribute(root, "task.result", "Completed".into());

        info!(
            task = result.task(),
            subtasks = result.subtask_results().len(),
            avg_similarity = result.similarity(),
            errors = result.errors(),
            "task completed"
        );
        stage(TaskStage::Done, result.task());
        Ok(result)
    }

    /// Decompose the assigned task, falling back to the keyword table on failure.
    ///
    /// Returns the steps and whether the fallback was used.
    fn plan(&self, task: &str, root: SpanId) -> (Vec<WorkflowStep>, bool) {
        if !self.planning_enabled {
            return (vec![WorkflowStep::Text(task.to_string())], false);
        }

        let span = self.recorder.start_span("planner.decompose", Some(root));
        self.recorder.set_attribute(span, "agent.role", "Planner".into());
        self.recorder.set_attribute(span, "task.input", task.into());

        let (steps, fallback) = match self.planner.decompose(task) {
            Ok(steps) => (steps, false),
            Err(e) => {
                warn!(error = %e, task, "planning failed, using fallback workflow");
                self.recorder.record_error(span, &e.to_string());
                let steps = fallback_workflow(task)
                    .into_iter()
                    .map(WorkflowStep::Text)
                    .collect();
                (steps, true)
            }
        };

        let raw: Vec<serde_json::Value> = steps.iter().map(step_json).collect();
        let subtasks = serde_json::Value::Array(raw).to_string();
        self.recorder.set_attribute(span, "workflow.subtasks", subtasks.into());
        self.recorder.end_span(span);
        (steps, fallback)
    }

    fn run_subtask(
        &self,
        index: usize,
        description: String,
        root: SpanId,
        error_sources: &mut Vec<String>,
        rng: &mut dyn RngCore,
    ) -> Result<SubtaskResult> {
        let span = self.recorder.start_span(&format!("subtask.{index}"), Some(root));
        self.recorder
            .set_attribute(span, "subtask.description", description.as_str().into());

        let assignment = match self.pool.select(rng) {
            Ok(assignment) => assignment,
            Err(e) => {
                self.recorder.record_error(span, &e.to_string());
                self.recorder.end_span(span);
                return Err(e);
            }
        };
        let coder = self
            .pool
            .coder(assignment)
            .ok_or_else(|| CrewError::pool_exhausted(WorkerRole::Coder))?;
        let reviewer = self
            .pool
            .reviewer(assignment)
            .ok_or_else(|| CrewError::pool_exhausted(WorkerRole::Reviewer))?;
        self.recorder.set_attribute(span, "subtask.coder", assignment.coder.into());
        self.recorder.set_attribute(span, "subtask.reviewer", assignment.reviewer.into());

        let code = coder.generate(&description, rng);
        let (code, corrupted) = self.noise.maybe_corrupt(code, rng);
        if corrupted {
            debug!(subtask = index, "bad code injected");
            error_sources.push(bad_code_tag(index));
        }

        let similarity = bounded(self.scorer.score(&description, &code));
        let verdict = reviewer.review(&code);

        self.recorder.set_attribute(span, "subtask.bad_code", corrupted.into());
        self.recorder.set_attribute(span, "subtask.similarity", similarity.into());
        self.recorder.set_attribute(span, "subtask.result", verdict.as_str().into());
        self.recorder.end_span(span);

        Ok(SubtaskResult {
            subtask: description,
            code,
            result: verdict,
            similarity,
        })
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("pool", &self.pool)
            .field("noise", self.noise.config())
            .field("planning_enabled", &self.planning_enabled)
            .finish_non_exhaustive()
    }
}

fn stage(stage: TaskStage, subject: &str) {
    debug!(stage = %stage, subject, "stage transition");
}

/// Scores outside [0, 1] or NaN never reach a `SubtaskResult`.
fn bounded(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn step_json(step: &WorkflowStep) -> serde_json::Value {
    match step {
        WorkflowStep::Text(text) => serde_json::Value::String(text.clone()),
        WorkflowStep::Structured(value) => value.clone(),
    }
}

fn json_list(items: &[String]) -> String {
    serde_json::Value::Array(items.iter().cloned().map(serde_json::Value::String).collect())
        .to_string()
}
