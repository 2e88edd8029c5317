//! Prompt templates for planning and task generation.

use crate::backend::CompletionRequest;

/// A prompt template for LLM requests.
pub trait PromptTemplate {
    /// Generate the prompt text.
    fn generate(&self) -> String;

    /// Get the system prompt (if any).
    fn system_prompt(&self) -> Option<String> {
        None
    }

    /// Whether the response must be a JSON object.
    fn json_mode(&self) -> bool {
        false
    }

    /// Bundle into a completion request.
    fn to_request(&self) -> CompletionRequest {
        let mut request = CompletionRequest::new(self.generate());
        request.system = self.system_prompt();
        request.json_mode = self.json_mode();
        request
    }
}

/// Prompt asking a model to split a backend task into subtasks.
#[derive(Debug, Clone)]
pub struct DecomposePrompt {
    pub task: String,
    pub min_subtasks: usize,
    pub max_subtasks: usize,
}

impl DecomposePrompt {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            min_subtasks: 2,
            max_subtasks: 4,
        }
    }

    pub fn with_range(mut self, min: usize, max: usize) -> Self {
        self.min_subtasks = min.min(max);
        self.max_subtasks = max.max(min);
        self
    }
}

impl PromptTemplate for DecomposePrompt {
    fn system_prompt(&self) -> Option<String> {
        Some(format!(
            "You are a software architect. Break technical tasks into {}-{} subtasks as JSON strings.",
            self.min_subtasks, self.max_subtasks
        ))
    }

    fn generate(&self) -> String {
        format!(
            "Decompose this backend task: {}\nOutput JSON format: {{\"subtasks\": [str]}}",
            self.task
        )
    }

    fn json_mode(&self) -> bool {
        true
    }
}

/// Prompt asking a model to write one backend feature request.
#[derive(Debug, Clone)]
pub struct FeatureRequestPrompt {
    pub task_type: String,
}

impl FeatureRequestPrompt {
    pub fn new(task_type: impl Into<String>) -> Self {
        Self {
            task_type: task_type.into(),
        }
    }
}

impl PromptTemplate for FeatureRequestPrompt {
    fn system_prompt(&self) -> Option<String> {
        Some(
            "You are a product manager creating technical requirements for software engineers."
                .to_string(),
        )
    }

    fn generate(&self) -> String {
        format!(
            "Generate a specific backend feature request for a {}. \
             Use technical language and include 1-2 key requirements.",
            self.task_type
        )
    }
}

/// Pull the outermost JSON object out of a model response.
///
/// Tolerates markdown code fences and chatter around the object.
pub fn extract_json_object(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    let text = text.trim();

    match (text.find(['{', '[']), text.rfind(['}', ']'])) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose_prompt_requests_json() {
        let request = DecomposePrompt::new("Add rate limiting").to_request();
        assert!(request.json_mode);
        assert!(request.prompt.contains("Decompose this backend task: Add rate limiting"));
        assert!(request.system.unwrap().contains("2-4 subtasks"));
    }

    #[test]
    fn feature_prompt_names_type() {
        let prompt = FeatureRequestPrompt::new("notification service");
        assert!(prompt.generate().contains("for a notification service."));
        assert!(!prompt.json_mode());
    }

    #[test]
    fn json_extraction_strips_fences() {
        let fenced = "```json\n{\"subtasks\": [\"a\"]}\n```";
        assert_eq!(extract_json_object(fenced), "{\"subtasks\": [\"a\"]}");

        let chatty = "Sure! Here it is: {\"subtasks\": []} Hope that helps.";
        assert_eq!(extract_json_object(chatty), "{\"subtasks\": []}");
    }
}
