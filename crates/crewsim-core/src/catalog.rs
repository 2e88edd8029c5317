//! Fixed catalogs: ambiguity qualifiers, non-implementation snippets,
//! fallback workflows and error-source tags.

/// Tasks a simulation runs when none are given.
pub const DEFAULT_TASKS: [&str; 4] = [
    "Implement user login with OAuth",
    "Add payment processing system",
    "Create user profile page with avatar upload",
    "Fix security vulnerability",
];

/// Vague qualifiers appended to tasks by ambiguity injection.
///
/// The similarity scorer strips these from descriptions, so the set must
/// stay in sync between injection and scoring.
pub const AMBIGUOUS_PHRASES: [&str; 4] = [
    "using appropriate methods",
    "with proper implementation",
    "following best practices",
    "in a scalable way",
];

/// Canned "non-implementations" swapped in by corruption injection.
pub const BAD_CODE_SNIPPETS: [&str; 5] = [
    "# TODO: Implement this functionality",
    "raise NotImplementedError('Pending implementation')",
    "return {'status': 'unimplemented'}",
    "// PLACEHOLDER: Actual code goes here",
    "pass  # To be completed",
];

/// Error source recorded when ambiguity injection fires.
pub const SYNTHETIC_AMBIGUITY: &str = "synthetic_ambiguity";

/// Error source recorded when the assigned task contains a catalog phrase.
pub const NATURAL_AMBIGUITY: &str = "natural_ambiguity";

/// Error source for an injected bad artifact (1-based subtask index).
pub fn bad_code_tag(index: usize) -> String {
    format!("subtask_{index}_bad_code")
}

/// Error source for a non-string planner step (1-based subtask index).
pub fn type_conversion_tag(index: usize) -> String {
    format!("subtask_{index}_type_conversion")
}

/// Collapse an error-source tag to its family, dropping the subtask index.
///
/// `subtask_3_bad_code` → `bad_code`; task-level tags pass through.
pub fn tag_family(tag: &str) -> &str {
    if let Some(rest) = tag.strip_prefix("subtask_") {
        if let Some((index, family)) = rest.split_once('_') {
            if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) {
                return family;
            }
        }
    }
    tag
}

/// Deterministic workflow used when the planner fails.
///
/// Keyword match is case-insensitive; authentication wins over payment.
pub fn fallback_workflow(task: &str) -> Vec<String> {
    let lowered = task.to_lowercase();
    if lowered.contains("authentication") {
        vec![
            "Design auth flow".to_string(),
            "Implement core logic".to_string(),
            "Add security safeguards".to_string(),
        ]
    } else if lowered.contains("payment") {
        vec![
            "Integrate payment gateway".to_string(),
            "Create transaction handling".to_string(),
            "Implement reconciliation".to_string(),
        ]
    } else {
        let prefix: String = task.chars().take(20).collect();
        vec![
            format!("Subtask 1 for {prefix}"),
            format!("Subtask 2 for {prefix}"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_fallback_is_exact() {
        assert_eq!(
            fallback_workflow("Add payment processing system"),
            vec![
                "Integrate payment gateway",
                "Create transaction handling",
                "Implement reconciliation"
            ]
        );
    }

    #[test]
    fn authentication_match_ignores_case() {
        let workflow = fallback_workflow("Harden AUTHENTICATION for admins");
        assert_eq!(workflow[0], "Design auth flow");
        assert_eq!(workflow.len(), 3);
    }

    #[test]
    fn generic_fallback_uses_first_twenty_chars() {
        let workflow = fallback_workflow("Create user profile page with avatar upload");
        assert_eq!(
            workflow,
            vec![
                "Subtask 1 for Create user profile ",
                "Subtask 2 for Create user profile "
            ]
        );
    }

    #[test]
    fn generic_fallback_handles_short_and_multibyte_tasks() {
        assert_eq!(fallback_workflow("Fix"), vec!["Subtask 1 for Fix", "Subtask 2 for Fix"]);
        let workflow = fallback_workflow("Überprüfe die Datenbankverbindung jetzt");
        assert_eq!(workflow[0], "Subtask 1 for Überprüfe die Datenb");
    }

    #[test]
    fn tag_families() {
        assert_eq!(tag_family(&bad_code_tag(3)), "bad_code");
        assert_eq!(tag_family(&type_conversion_tag(12)), "type_conversion");
        assert_eq!(tag_family(SYNTHETIC_AMBIGUITY), "synthetic_ambiguity");
        assert_eq!(tag_family("subtask_x_odd"), "subtask_x_odd");
    }
}
