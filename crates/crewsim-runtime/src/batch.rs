//! Sequential batch runner.

use crate::orchestrator::Orchestrator;
use crewsim_core::error::CrewError;
use crewsim_core::types::TaskResult;
use rand::RngCore;
use tracing::warn;

/// What happened to one task in a batch.
#[derive(Debug)]
pub enum TaskOutcome {
    Completed(TaskResult),
    Failed { task: String, error: CrewError },
}

impl TaskOutcome {
    pub fn result(&self) -> Option<&TaskResult> {
        match self {
            TaskOutcome::Completed(result) => Some(result),
            TaskOutcome::Failed { .. } => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskOutcome::Completed(_))
    }
}

/// Run every task in order. A failed task is recorded and the batch goes on.
pub fn run_batch<I, S>(
    orchestrator: &Orchestrator,
    tasks: I,
    rng: &mut dyn RngCore,
) -> Vec<TaskOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    run_batch_with(orchestrator, tasks, rng, |_, _| {})
}

/// Like [`run_batch`], calling `on_outcome(index, outcome)` after each task.
pub fn run_batch_with<I, S, F>(
    orchestrator: &Orchestrator,
    tasks: I,
    rng: &mut dyn RngCore,
    mut on_outcome: F,
) -> Vec<TaskOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(usize, &TaskOutcome),
{
    let mut outcomes = Vec::new();
    for (index, task) in tasks.into_iter().enumerate() {
        let task = task.as_ref();
        let outcome = match orchestrator.run_task(task, rng) {
            Ok(result) => TaskOutcome::Completed(result),
            Err(error) => {
                warn!(task, error = %error, "task failed");
                TaskOutcome::Failed {
                    task: task.to_string(),
                    error,
                }
            }
        };
        on_outcome(index, &outcome);
        outcomes.push(outcome);
    }
    outcomes
}

/// The results of every completed task, in batch order.
pub fn completed_results(outcomes: Vec<TaskOutcome>) -> Vec<TaskResult> {
    outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            TaskOutcome::Completed(result) => Some(result),
            TaskOutcome::Failed { .. } => None,
        })
        .collect()
}
