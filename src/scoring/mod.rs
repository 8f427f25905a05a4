//! Quality score composition
//!
//! Two formulas, picked by whether static metrics are available.
//!
//! # Feature-only
//!
//! ```text
//! score = clamp(P(good) × 100 × 0.4 + feature_points × 0.6, 0, 100)
//!
//! feature_points = 50
//!   + 8 docstrings + 8 type hints + 4 any comment + 3 main guard
//!   + 7 snake_case function + 3 comprehension
//!   - 5 average line length > 100
//!   - 10 no functions and no classes
//! ```
//!
//! # Composite
//!
//! ```text
//! score = clamp(ml + mi + complexity + features, 0, 100)
//!
//! ml         = P(good) × 100 × 0.3
//! mi         = maintainability_index × 0.3
//! complexity = max(0, 100 - avg_complexity × 5) × 0.2
//! features   = min(100, points × 5) × 0.2
//!   points = 5 docstrings + 5 type hints + 4 snake_case function
//!          + 2 any comment + 4 comment_ratio > 0.1
//! ```
//!
//! The reported score is rounded to two decimals; rating and label are
//! derived from the reported value.

use tracing::{debug, warn};

use crate::classifier::{FeatureExtractor, QualityClassifier};
use crate::models::{
    round2, CodeMetrics, FallbackPrediction, FeatureVector, PredictionOutcome, PredictionRecord,
    QualityLabel, Rating,
};

/// Score from classifier output and textual features alone
pub fn feature_only_score(features: &FeatureVector, good_probability: f64) -> f64 {
    let base = good_probability * 100.0 * 0.4;

    let mut points = 50.0;
    if features.has_docstrings {
        points += 8.0;
    }
    if features.has_type_hints {
        points += 8.0;
    }
    if features.num_comments > 0 {
        points += 4.0;
    }
    if features.has_main_guard {
        points += 3.0;
    }
    if features.proper_naming {
        points += 7.0;
    }
    if features.uses_comprehension {
        points += 3.0;
    }

    if features.line_length_avg > 100.0 {
        points -= 5.0;
    }
    if features.num_functions == 0 && features.num_classes == 0 {
        points -= 10.0;
    }

    (base + points * 0.6).clamp(0.0, 100.0)
}

/// Score blending classifier output, static metrics and features
pub fn composite_score(
    features: &FeatureVector,
    good_probability: f64,
    metrics: &CodeMetrics,
) -> f64 {
    let ml = good_probability * 100.0 * 0.3;
    let mi = metrics.maintainability_index * 0.3;
    let complexity = (100.0 - metrics.avg_complexity * 5.0).max(0.0) * 0.2;

    let mut points = 0.0;
    if features.has_docstrings {
        points += 5.0;
    }
    if features.has_type_hints {
        points += 5.0;
    }
    if features.proper_naming {
        points += 4.0;
    }
    if features.num_comments > 0 {
        points += 2.0;
    }
    if metrics.comment_ratio > 0.1 {
        points += 4.0;
    }
    let feature_term = f64::min(100.0, points * 5.0) * 0.2;

    (ml + mi + complexity + feature_term).clamp(0.0, 100.0)
}

/// Runs feature extraction, classification and score composition
#[derive(Debug, Clone)]
pub struct ScoreComposer<'a> {
    classifier: &'a QualityClassifier,
    extractor: FeatureExtractor,
}

impl<'a> ScoreComposer<'a> {
    pub fn new(classifier: &'a QualityClassifier) -> Self {
        Self {
            classifier,
            extractor: FeatureExtractor::new(),
        }
    }

    /// Predict quality for `code`
    ///
    /// Uses the composite formula when `metrics` is given. Classifier
    /// failures degrade to [`FallbackPrediction`] instead of propagating.
    pub fn predict(&self, code: &str, metrics: Option<&CodeMetrics>) -> PredictionOutcome {
        let features = self.extractor.extract(code);
        let probabilities = match self.classifier.predict(code) {
            Ok(p) => p,
            Err(e) => {
                warn!("Classifier failed, using fallback prediction: {}", e);
                return PredictionOutcome::Fallback(FallbackPrediction::new(e.to_string()));
            }
        };

        let score = match metrics {
            Some(metrics) => composite_score(&features, probabilities.good, metrics),
            None => feature_only_score(&features, probabilities.good),
        };
        let quality_score = round2(score);
        debug!(
            "quality score {:.2} (P(good)={:.3}, composite={})",
            quality_score,
            probabilities.good,
            metrics.is_some()
        );

        PredictionOutcome::Scored(PredictionRecord {
            quality_score,
            prediction: QualityLabel::from_score(quality_score),
            confidence: round2(probabilities.confidence()),
            features,
            rating: Rating::from_score(quality_score),
        })
    }
}
