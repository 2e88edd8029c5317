//! Model-backed planner.

use crate::backend::{LlmBackend, LlmError};
use crate::prompt::{extract_json_object, DecomposePrompt, PromptTemplate};
use crewsim_core::agent::Planner;
use crewsim_core::error::PlannerError;
use crewsim_core::types::WorkflowStep;
use tracing::debug;

/// Planner that asks a chat model for a JSON `{"subtasks": [...]}` object.
///
/// Items are passed through as-is: strings become `WorkflowStep::Text`,
/// anything else stays `Structured` for the orchestrator to coerce and tag.
pub struct LlmPlanner<B> {
    backend: B,
    temperature: f32,
    max_tokens: u32,
}

impl<B: LlmBackend> LlmPlanner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            temperature: 0.3,
            max_tokens: 300,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: LlmBackend> Planner for LlmPlanner<B> {
    fn decompose(&self, task: &str) -> Result<Vec<WorkflowStep>, PlannerError> {
        let request = DecomposePrompt::new(task)
            .to_request()
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let response = self.backend.complete(&request).map_err(|e| match e {
            LlmError::InvalidResponse(msg) => PlannerError::InvalidResponse(msg),
            other => PlannerError::Unavailable(other.to_string()),
        })?;

        let steps = parse_subtasks(&response)?;
        debug!(backend = self.backend.name(), count = steps.len(), "planner produced workflow");
        Ok(steps)
    }
}

/// Parse a planner response into workflow steps.
///
/// Accepts `{"subtasks": [...]}` or a bare array. An object without a
/// `subtasks` key is an empty workflow.
pub fn parse_subtasks(response: &str) -> Result<Vec<WorkflowStep>, PlannerError> {
    let json = extract_json_object(response);
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| PlannerError::InvalidResponse(format!("{e}: {response}")))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("subtasks") {
            Some(serde_json::Value::Array(items)) => items,
            Some(other) => {
                return Err(PlannerError::InvalidResponse(format!(
                    "subtasks is not an array: {other}"
                )))
            }
            None => Vec::new(),
        },
        other => {
            return Err(PlannerError::InvalidResponse(format!(
                "expected a JSON object, got {other}"
            )))
        }
    };

    Ok(items.into_iter().map(WorkflowStep::from_json).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;

    #[test]
    fn parses_string_subtasks() {
        let steps = parse_subtasks(r#"{"subtasks": ["Design auth flow", "Write tests"]}"#).unwrap();
        assert_eq!(
            steps,
            vec![
                WorkflowStep::from("Design auth flow"),
                WorkflowStep::from("Write tests")
            ]
        );
    }

    #[test]
    fn keeps_non_string_items_structured() {
        let steps =
            parse_subtasks(r#"{"subtasks": [{"title": "Schema"}, 42, "Handler"]}"#).unwrap();
        assert!(matches!(steps[0], WorkflowStep::Structured(_)));
        assert!(matches!(steps[1], WorkflowStep::Structured(_)));
        assert_eq!(steps[2], WorkflowStep::from("Handler"));
    }

    #[test]
    fn missing_key_is_empty_and_garbage_is_an_error() {
        assert!(parse_subtasks(r#"{"plan": []}"#).unwrap().is_empty());
        assert!(parse_subtasks("I cannot help with that").is_err());
        assert!(parse_subtasks(r#"{"subtasks": "one big task"}"#).is_err());
    }

    #[test]
    fn backend_failure_maps_to_planner_error() {
        let planner = LlmPlanner::new(MockBackend::failing("connection refused"));
        let err = planner.decompose("Add payment processing system").unwrap_err();
        assert!(matches!(err, PlannerError::Unavailable(_)));
    }

    #[test]
    fn planner_sends_decompose_prompt() {
        let backend = MockBackend::new().with_response(
            "Decompose this backend task: Fix security vulnerability",
            "```json\n{\"subtasks\": [\"Audit inputs\", \"Patch handler\", \"Add regression test\"]}\n```",
        );
        let planner = LlmPlanner::new(backend);
        let steps = planner.decompose("Fix security vulnerability").unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(planner.backend().calls(), 1);
    }
}
