//! Textual features of raw source
//!
//! Plain substring and regex checks, no syntax tree involved. Function and
//! class counts come from definition patterns and may differ from the
//! tree-based structural counts of the metric stage.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::FeatureVector;

static COMMENT: OnceLock<Regex> = OnceLock::new();
static FUNCTION_DEF: OnceLock<Regex> = OnceLock::new();
static CLASS_DEF: OnceLock<Regex> = OnceLock::new();
static SNAKE_CASE_DEF: OnceLock<Regex> = OnceLock::new();

fn comment() -> &'static Regex {
    COMMENT.get_or_init(|| Regex::new(r"#.*").expect("valid regex"))
}

fn function_def() -> &'static Regex {
    FUNCTION_DEF.get_or_init(|| Regex::new(r"def\s+\w+").expect("valid regex"))
}

fn class_def() -> &'static Regex {
    CLASS_DEF.get_or_init(|| Regex::new(r"class\s+\w+").expect("valid regex"))
}

fn snake_case_def() -> &'static Regex {
    SNAKE_CASE_DEF.get_or_init(|| Regex::new(r"def\s+[a-z_][a-z0-9_]*").expect("valid regex"))
}

/// Extracts a [`FeatureVector`] from source text
#[derive(Debug, Default, Clone, Copy)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, code: &str) -> FeatureVector {
        // Splitting on '\n' always yields at least one (possibly empty) line
        let lines: Vec<&str> = code.split('\n').collect();
        let total_chars: usize = lines.iter().map(|line| line.chars().count()).sum();

        FeatureVector {
            line_length_avg: total_chars as f64 / lines.len() as f64,
            has_docstrings: code.contains("\"\"\"") || code.contains("'''"),
            has_type_hints: code.contains("->") || code.contains(": "),
            num_comments: comment().find_iter(code).count(),
            num_functions: function_def().find_iter(code).count(),
            num_classes: class_def().find_iter(code).count(),
            has_main_guard: code.contains("__main__"),
            // Coarse on purpose: any '[' plus any "for" anywhere
            uses_comprehension: code.contains('[') && code.contains("for"),
            proper_naming: snake_case_def().is_match(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_typed_module() {
        let code = r#"
def load(path: str) -> list:
    """Read lines."""
    # strip newlines
    return [l for l in open(path)]

if __name__ == "__main__":
    load("x")
"#;
        let f = FeatureExtractor::new().extract(code);
        assert!(f.has_docstrings);
        assert!(f.has_type_hints);
        assert!(f.has_main_guard);
        assert!(f.uses_comprehension);
        assert!(f.proper_naming);
        assert_eq!(f.num_comments, 1);
        assert_eq!(f.num_functions, 1);
        assert_eq!(f.num_classes, 0);
    }

    #[test]
    fn test_empty_input() {
        let f = FeatureExtractor::new().extract("");
        assert_eq!(f.line_length_avg, 0.0);
        assert_eq!(f.num_functions, 0);
        assert!(!f.has_docstrings);
        assert!(!f.proper_naming);
    }

    #[test]
    fn test_line_length_counts_characters() {
        // "ab" and "cdef" average to 3; "é" counts once
        assert_eq!(FeatureExtractor::new().extract("ab\ncdef").line_length_avg, 3.0);
        assert_eq!(FeatureExtractor::new().extract("é").line_length_avg, 1.0);
    }

    #[test]
    fn test_naming_and_pattern_counts() {
        let code = "class A:\n    def Run(self): pass\nclass B: pass\n";
        let f = FeatureExtractor::new().extract(code);
        assert_eq!(f.num_classes, 2);
        assert_eq!(f.num_functions, 1);
        assert!(!f.proper_naming);
        // ": " after the class header counts as a type hint
        assert!(f.has_type_hints);
    }

    #[test]
    fn test_comments_counted_per_line() {
        let f = FeatureExtractor::new().extract("x = 1  # a # b\n# c\n");
        assert_eq!(f.num_comments, 2);
    }

    #[test]
    fn test_patterns_inside_strings_still_match() {
        let f = FeatureExtractor::new().extract("text = 'def helper and [for]'\n");
        assert!(f.proper_naming);
        assert!(f.uses_comprehension);
        assert_eq!(f.num_functions, 1);
    }
}
