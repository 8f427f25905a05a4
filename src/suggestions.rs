//! Improvement suggestions derived from a metrics record
//!
//! Every rule is an independent threshold check, evaluated in a fixed order.

use crate::models::{CodeMetrics, MetricsRecord};

/// Smell descriptions listed individually after the summary line
const LISTED_SMELLS: usize = 3;

pub fn generate_suggestions(record: &MetricsRecord) -> Vec<String> {
    match record {
        MetricsRecord::Failed { message, .. } => vec![format!("Fix syntax errors: {}", message)],
        MetricsRecord::Analyzed(metrics) => suggestions_for(metrics),
    }
}

fn suggestions_for(metrics: &CodeMetrics) -> Vec<String> {
    let mut suggestions = Vec::new();

    if metrics.avg_complexity > 10.0 {
        suggestions.push(
            "⚠️ High average complexity - consider refactoring complex functions".to_string(),
        );
    }
    if metrics.max_complexity > 15 {
        suggestions
            .push("🔴 Very high maximum complexity - break down complex functions".to_string());
    }

    let mi = metrics.maintainability_index;
    suggestions.push(
        if mi < 20.0 {
            "🔴 Low maintainability - major refactoring recommended"
        } else if mi < 50.0 {
            "⚠️ Moderate maintainability - some refactoring suggested"
        } else {
            "✅ Good maintainability!"
        }
        .to_string(),
    );

    if metrics.comment_ratio < 0.1 {
        suggestions.push("📝 Low comment ratio - add more documentation".to_string());
    } else if metrics.comment_ratio > 0.3 {
        suggestions.push("✅ Well documented code!".to_string());
    }

    let smells = &metrics.code_smells;
    if !smells.is_empty() {
        suggestions.push(format!(
            "🔍 Code smells detected: {} issues found",
            smells.len()
        ));
        suggestions.extend(
            smells
                .iter()
                .take(LISTED_SMELLS)
                .map(|smell| format!("  - {}", smell)),
        );
    }

    if smells.is_empty() && mi > 50.0 {
        suggestions.push("🌟 Clean code! Keep up the good work!".to_string());
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> CodeMetrics {
        CodeMetrics {
            maintainability_index: 75.0,
            comment_ratio: 0.2,
            ..Default::default()
        }
    }

    #[test]
    fn test_syntax_error_single_suggestion() {
        let record = MetricsRecord::syntax_error("invalid syntax (<string>, line 3)");
        assert_eq!(
            generate_suggestions(&record),
            vec!["Fix syntax errors: invalid syntax (<string>, line 3)".to_string()]
        );
    }

    #[test]
    fn test_clean_code() {
        let out = generate_suggestions(&MetricsRecord::Analyzed(metrics()));
        assert_eq!(
            out,
            vec![
                "✅ Good maintainability!".to_string(),
                "🌟 Clean code! Keep up the good work!".to_string(),
            ]
        );
    }

    #[test]
    fn test_maintainability_buckets_are_exclusive() {
        let buckets = [
            "🔴 Low maintainability",
            "⚠️ Moderate maintainability",
            "✅ Good maintainability!",
        ];
        for mi in [0.0, 19.99, 20.0, 49.99, 50.0, 100.0] {
            let record = MetricsRecord::Analyzed(CodeMetrics {
                maintainability_index: mi,
                ..metrics()
            });
            let out = generate_suggestions(&record);
            let hits = out
                .iter()
                .filter(|s| buckets.iter().any(|b| s.starts_with(b)))
                .count();
            assert_eq!(hits, 1, "mi={mi}: {out:?}");
        }
    }

    #[test]
    fn test_mi_of_exactly_fifty_is_not_clean() {
        let record = MetricsRecord::Analyzed(CodeMetrics {
            maintainability_index: 50.0,
            ..metrics()
        });
        let out = generate_suggestions(&record);
        assert!(out.contains(&"✅ Good maintainability!".to_string()));
        assert!(!out.iter().any(|s| s.starts_with("🌟")));
    }

    #[test]
    fn test_complexity_and_documentation_rules() {
        let record = MetricsRecord::Analyzed(CodeMetrics {
            avg_complexity: 12.0,
            max_complexity: 16,
            maintainability_index: 10.0,
            comment_ratio: 0.05,
            ..Default::default()
        });
        assert_eq!(
            generate_suggestions(&record),
            vec![
                "⚠️ High average complexity - consider refactoring complex functions".to_string(),
                "🔴 Very high maximum complexity - break down complex functions".to_string(),
                "🔴 Low maintainability - major refactoring recommended".to_string(),
                "📝 Low comment ratio - add more documentation".to_string(),
            ]
        );
    }

    #[test]
    fn test_well_documented() {
        let record = MetricsRecord::Analyzed(CodeMetrics {
            comment_ratio: 0.5,
            ..metrics()
        });
        assert!(generate_suggestions(&record).contains(&"✅ Well documented code!".to_string()));
    }

    #[test]
    fn test_only_first_three_smells_listed() {
        let record = MetricsRecord::Analyzed(CodeMetrics {
            code_smells: (1..=5).map(|i| format!("smell {i}")).collect(),
            ..metrics()
        });
        let out = generate_suggestions(&record);
        assert_eq!(out[1], "🔍 Code smells detected: 5 issues found");
        assert_eq!(&out[2..], ["  - smell 1", "  - smell 2", "  - smell 3"]);
    }
}
