//! Magic numbers detector
//!
//! A purely textual check: any standalone run of two or more digits in the
//! source, including inside strings and comments, marks the module.

use std::sync::OnceLock;

use regex::Regex;

use crate::detectors::Detector;
use crate::parsers::ParsedModule;

static MULTI_DIGIT: OnceLock<Regex> = OnceLock::new();

fn multi_digit() -> &'static Regex {
    MULTI_DIGIT.get_or_init(|| Regex::new(r"\b\d{2,}\b").expect("valid regex"))
}

pub struct MagicNumbersDetector;

impl MagicNumbersDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MagicNumbersDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for MagicNumbersDetector {
    fn name(&self) -> &'static str {
        "magic-numbers"
    }

    fn description(&self) -> &'static str {
        "Detects unnamed numeric literals"
    }

    fn detect(&self, module: &ParsedModule) -> Vec<String> {
        if multi_digit().is_match(module.source()) {
            vec!["Magic numbers detected - consider using constants".to_string()]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_source;

    fn detect(source: &str) -> Vec<String> {
        MagicNumbersDetector::new().detect(&parse_source(source).expect("valid python"))
    }

    #[test]
    fn test_single_digits_are_fine() {
        assert!(detect("x = 1\ny = x * 2\n").is_empty());
    }

    #[test]
    fn test_two_digit_literal_is_flagged() {
        assert_eq!(detect("timeout = 30\n").len(), 1);
    }

    #[test]
    fn test_matches_inside_strings_and_comments() {
        assert_eq!(detect("# retry 10 times\nx = 1\n").len(), 1);
        assert_eq!(detect("name = 'port 8080'\n").len(), 1);
    }

    #[test]
    fn test_digits_inside_identifiers_do_not_match() {
        assert!(detect("var12 = 1\n").is_empty());
    }

    #[test]
    fn test_single_entry_for_many_numbers() {
        assert_eq!(detect("a = 10\nb = 20\nc = 30\n").len(), 1);
    }
}
