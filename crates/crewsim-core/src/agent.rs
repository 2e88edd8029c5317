//! Agent roles: the collaborators a task run is routed through.
//!
//! Each role is a capability interface with exactly one method. Mock,
//! template and model-backed implementations are interchangeable variants
//! behind the same trait, so the orchestrator never knows which it holds.
//!
//! All roles are `Send + Sync`: pools are shared read-only between task
//! runs, and implementations must be reentrant.

use crate::error::PlannerError;
use crate::types::{Verdict, WorkflowStep};
use rand::RngCore;

/// Breaks an assigned task into an ordered workflow.
///
/// The only fallible role. A failure is recovered by the orchestrator
/// with the keyword fallback workflow.
pub trait Planner: Send + Sync {
    fn decompose(&self, task: &str) -> Result<Vec<WorkflowStep>, PlannerError>;
}

/// Produces a code artifact for one subtask.
///
/// The random source is the orchestrator's, so coders that pick among
/// canned implementations stay reproducible under a seed.
pub trait Coder: Send + Sync {
    fn generate(&self, subtask: &str, rng: &mut dyn RngCore) -> String;
}

/// Judges a code artifact.
pub trait Reviewer: Send + Sync {
    fn review(&self, code: &str) -> Verdict;
}

/// Scores how well an artifact addresses a description, in [0, 1].
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, description: &str, artifact: &str) -> f64;
}

impl<T: Planner + ?Sized> Planner for Box<T> {
    fn decompose(&self, task: &str) -> Result<Vec<WorkflowStep>, PlannerError> {
        (**self).decompose(task)
    }
}

impl<T: Coder + ?Sized> Coder for Box<T> {
    fn generate(&self, subtask: &str, rng: &mut dyn RngCore) -> String {
        (**self).generate(subtask, rng)
    }
}

impl<T: Reviewer + ?Sized> Reviewer for Box<T> {
    fn review(&self, code: &str) -> Verdict {
        (**self).review(code)
    }
}

impl<T: SimilarityScorer + ?Sized> SimilarityScorer for Box<T> {
    fn score(&self, description: &str, artifact: &str) -> f64 {
        (**self).score(description, artifact)
    }
}
