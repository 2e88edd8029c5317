//! Worker pools and per-subtask assignment.

use crewsim_core::agent::{Coder, Reviewer};
use crewsim_core::error::{CrewError, Result, WorkerRole};
use rand::Rng;

/// Indices of the workers picked for one subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub coder: usize,
    pub reviewer: usize,
}

/// Coders and reviewers available to the orchestrator. Read-only once built.
pub struct WorkerPool {
    coders: Vec<Box<dyn Coder>>,
    reviewers: Vec<Box<dyn Reviewer>>,
}

impl WorkerPool {
    pub fn new(coders: Vec<Box<dyn Coder>>, reviewers: Vec<Box<dyn Reviewer>>) -> Self {
        Self { coders, reviewers }
    }

    /// An empty pool, to be filled with [`with_coder`](Self::with_coder) and
    /// [`with_reviewer`](Self::with_reviewer).
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn with_coder(mut self, coder: impl Coder + 'static) -> Self {
        self.coders.push(Box::new(coder));
        self
    }

    pub fn with_reviewer(mut self, reviewer: impl Reviewer + 'static) -> Self {
        self.reviewers.push(Box::new(reviewer));
        self
    }

    pub fn coder_count(&self) -> usize {
        self.coders.len()
    }

    pub fn reviewer_count(&self) -> usize {
        self.reviewers.len()
    }

    /// Fail if either role has no workers.
    pub fn ensure_staffed(&self) -> Result<()> {
        if self.coders.is_empty() {
            return Err(CrewError::pool_exhausted(WorkerRole::Coder));
        }
        if self.reviewers.is_empty() {
            return Err(CrewError::pool_exhausted(WorkerRole::Reviewer));
        }
        Ok(())
    }

    /// Pick a coder and a reviewer, uniformly and independently.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Assignment> {
        self.ensure_staffed()?;
        let coder = rng.gen_range(0..self.coders.len());
        let reviewer = rng.gen_range(0..self.reviewers.len());
        Ok(Assignment { coder, reviewer })
    }

    pub fn coder(&self, assignment: Assignment) -> Option<&dyn Coder> {
        self.coders.get(assignment.coder).map(|c| &**c)
    }

    pub fn reviewer(&self, assignment: Assignment) -> Option<&dyn Reviewer> {
        self.reviewers.get(assignment.reviewer).map(|r| &**r)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("coders", &self.coders.len())
            .field("reviewers", &self.reviewers.len())
            .finish()
    }
}
