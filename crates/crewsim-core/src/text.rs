//! Text normalisation shared by the similarity scorer and the reviewers.
//!
//! Comment syntax is recognised regardless of an artifact's nominal
//! language: `# …` and `// …` run to end of line, `/* … */` may span lines.

use crate::catalog::AMBIGUOUS_PHRASES;
use regex::Regex;
use std::sync::OnceLock;

fn comment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)/\*.*?\*/|#[^\n]*|//[^\n]*").expect("comment pattern is valid")
    })
}

/// Remove line and block comments.
pub fn strip_comments(code: &str) -> String {
    comment_pattern().replace_all(code, "").into_owned()
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove every catalog ambiguity phrase.
pub fn strip_ambiguity(text: &str) -> String {
    AMBIGUOUS_PHRASES
        .iter()
        .fold(text.to_string(), |acc, phrase| acc.replace(phrase, ""))
}

/// Artifact as the scorer and reviewers see it: comments gone, whitespace collapsed.
pub fn clean_artifact(code: &str) -> String {
    collapse_whitespace(&strip_comments(code))
}

/// Description as the scorer sees it: ambiguity filler gone, whitespace collapsed.
pub fn clean_description(description: &str) -> String {
    collapse_whitespace(&strip_ambiguity(description))
}

/// Whether any catalog phrase occurs in `text`.
pub fn contains_ambiguity(text: &str) -> bool {
    AMBIGUOUS_PHRASES.iter().any(|phrase| text.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_all_comment_forms() {
        let code = "x = 1  # set x\n// note\ny = /* inline\nblock */ 2";
        assert_eq!(clean_artifact(code), "x = 1 y = 2");
    }

    #[test]
    fn hash_comment_stops_at_line_end() {
        let code = "# header\nreturn value";
        assert_eq!(clean_artifact(code), "return value");
    }

    #[test]
    fn description_loses_filler() {
        let description = "Implement login  using appropriate methods";
        assert_eq!(clean_description(description), "Implement login");
        assert_eq!(
            clean_description("Cache queries following best practices in a scalable way"),
            "Cache queries"
        );
    }

    #[test]
    fn ambiguity_detection() {
        assert!(contains_ambiguity("Build API with proper implementation"));
        assert!(!contains_ambiguity("Build API"));
    }
}
