//! Planners that never leave the process.

use crewsim_core::agent::Planner;
use crewsim_core::catalog::fallback_workflow;
use crewsim_core::error::PlannerError;
use crewsim_core::types::WorkflowStep;

/// Always returns the same workflow.
#[derive(Debug, Clone, Default)]
pub struct StaticPlanner {
    steps: Vec<WorkflowStep>,
}

impl StaticPlanner {
    pub fn new(steps: Vec<WorkflowStep>) -> Self {
        Self { steps }
    }

    /// A planner over plain-text steps.
    pub fn from_texts<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(steps.into_iter().map(|s| WorkflowStep::Text(s.into())).collect())
    }
}

impl Planner for StaticPlanner {
    fn decompose(&self, _task: &str) -> Result<Vec<WorkflowStep>, PlannerError> {
        Ok(self.steps.clone())
    }
}

/// Plans with the keyword fallback table directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordPlanner;

impl Planner for KeywordPlanner {
    fn decompose(&self, task: &str) -> Result<Vec<WorkflowStep>, PlannerError> {
        Ok(fallback_workflow(task)
            .into_iter()
            .map(WorkflowStep::Text)
            .collect())
    }
}

/// Fails every call, like a model endpoint that is down.
#[derive(Debug, Clone)]
pub struct FailingPlanner {
    reason: String,
}

impl FailingPlanner {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for FailingPlanner {
    fn default() -> Self {
        Self::new("planner unavailable")
    }
}

impl Planner for FailingPlanner {
    fn decompose(&self, _task: &str) -> Result<Vec<WorkflowStep>, PlannerError> {
        Err(PlannerError::Unavailable(self.reason.clone()))
    }
}
