//! Maintainability Index
//!
//! ```text
//! MI = clamp((171 - 5.2 ln V - 0.23 G - 16.2 ln L + 50 sin(sqrt(2.46 rad(C)))) * 100 / 171, 0, 100)
//! ```
//!
//! V is the Halstead volume, G the total cyclomatic complexity, L the
//! logical line count and C the percentage of comment and docstring lines
//! relative to source lines.

use super::raw::RawMetrics;

/// Comment and docstring lines as a percentage of source lines
pub fn comment_percentage(raw: &RawMetrics) -> f64 {
    if raw.source_lines == 0 {
        return 0.0;
    }
    (raw.comments + raw.multi) as f64 / raw.source_lines as f64 * 100.0
}

/// Compute the index; trivially small modules score a perfect 100
pub fn maintainability_index(
    halstead_volume: f64,
    total_complexity: u32,
    logical_lines: usize,
    comment_percent: f64,
) -> f64 {
    if halstead_volume <= 0.0 || logical_lines == 0 {
        return 100.0;
    }

    let volume_scale = halstead_volume.ln();
    let lines_scale = (logical_lines as f64).ln();
    let comments_scale = (2.46 * comment_percent.to_radians()).sqrt();

    let raw_mi = 171.0 - 5.2 * volume_scale - 0.23 * total_complexity as f64 - 16.2 * lines_scale
        + 50.0 * comments_scale.sin();

    (raw_mi * 100.0 / 171.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivial_input_is_perfect() {
        assert_eq!(maintainability_index(0.0, 0, 10, 0.0), 100.0);
        assert_eq!(maintainability_index(12.0, 3, 0, 0.0), 100.0);
    }

    #[test]
    fn test_larger_programs_score_lower() {
        let small = maintainability_index(50.0, 2, 10, 0.0);
        let large = maintainability_index(5000.0, 40, 400, 0.0);
        assert!(small > large);
        assert!((0.0..=100.0).contains(&small));
        assert!((0.0..=100.0).contains(&large));
    }

    #[test]
    fn test_known_value_without_comments() {
        // 171 - 5.2 ln(100) - 0.23 * 5 - 16.2 ln(20)
        let expected = (171.0 - 5.2 * 100f64.ln() - 1.15 - 16.2 * 20f64.ln()) * 100.0 / 171.0;
        let mi = maintainability_index(100.0, 5, 20, 0.0);
        assert!((mi - expected).abs() < 1e-9);
    }

    #[test]
    fn test_comments_improve_score() {
        let bare = maintainability_index(300.0, 6, 40, 0.0);
        let documented = maintainability_index(300.0, 6, 40, 25.0);
        assert!(documented > bare);
    }

    #[test]
    fn test_comment_percentage() {
        let raw = RawMetrics {
            lines_of_code: 14,
            source_lines: 10,
            comments: 2,
            multi: 3,
            ..Default::default()
        };
        assert!((comment_percentage(&raw) - 50.0).abs() < 1e-9);
        assert_eq!(comment_percentage(&RawMetrics::default()), 0.0);
    }
}
