//! Core data models for pyreview
//!
//! These records flow between the pipeline stages and are serialized
//! verbatim as the JSON returned by the service and the CLI.

use serde::{Deserialize, Serialize};

/// Round to two decimal places, the precision every reported float uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Metrics for a source file that parsed successfully
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CodeMetrics {
    pub lines_of_code: usize,
    pub logical_lines: usize,
    pub source_lines: usize,
    pub comments: usize,
    pub blank_lines: usize,
    /// `comments / lines_of_code`, 0 for empty input
    pub comment_ratio: f64,
    pub avg_complexity: f64,
    pub max_complexity: u32,
    pub maintainability_index: f64,
    pub halstead_volume: f64,
    pub halstead_difficulty: f64,
    pub num_functions: usize,
    pub num_classes: usize,
    pub num_imports: usize,
    pub num_loops: usize,
    pub num_conditionals: usize,
    /// Human-readable smell descriptions, in detector order
    pub code_smells: Vec<String>,
}

/// Outcome of the metric extraction stage
///
/// A failed record short-circuits smell detection and suggestion rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricsRecord {
    Analyzed(CodeMetrics),
    Failed {
        error: String,
        message: String,
        lines_of_code: usize,
    },
}

impl MetricsRecord {
    pub fn syntax_error(message: impl Into<String>) -> Self {
        MetricsRecord::Failed {
            error: "Syntax error in code".to_string(),
            message: message.into(),
            lines_of_code: 0,
        }
    }

    /// The success payload, if any
    pub fn metrics(&self) -> Option<&CodeMetrics> {
        match self {
            MetricsRecord::Analyzed(metrics) => Some(metrics),
            MetricsRecord::Failed { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MetricsRecord::Failed { .. })
    }

    pub fn lines_of_code(&self) -> usize {
        match self {
            MetricsRecord::Analyzed(metrics) => metrics.lines_of_code,
            MetricsRecord::Failed { lines_of_code, .. } => *lines_of_code,
        }
    }
}

/// Textual features extracted from raw source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FeatureVector {
    pub line_length_avg: f64,
    pub has_docstrings: bool,
    pub has_type_hints: bool,
    pub num_comments: usize,
    pub num_functions: usize,
    pub num_classes: usize,
    pub has_main_guard: bool,
    pub uses_comprehension: bool,
    pub proper_naming: bool,
}

/// Letter grade derived from a quality score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    A,
    B,
    C,
    D,
    F,
}

impl Rating {
    /// Strict step function: >=85 A, >=70 B, >=55 C, >=40 D, else F
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Rating::A
        } else if score >= 70.0 {
            Rating::B
        } else if score >= 55.0 {
            Rating::C
        } else if score >= 40.0 {
            Rating::D
        } else {
            Rating::F
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::A => write!(f, "A"),
            Rating::B => write!(f, "B"),
            Rating::C => write!(f, "C"),
            Rating::D => write!(f, "D"),
            Rating::F => write!(f, "F"),
        }
    }
}

/// Discrete verdict attached to a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLabel {
    Good,
    NeedsImprovement,
    Unknown,
}

impl QualityLabel {
    /// "good" at 70 and above, otherwise "needs_improvement"
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            QualityLabel::Good
        } else {
            QualityLabel::NeedsImprovement
        }
    }
}

impl std::fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityLabel::Good => write!(f, "good"),
            QualityLabel::NeedsImprovement => write!(f, "needs_improvement"),
            QualityLabel::Unknown => write!(f, "unknown"),
        }
    }
}

/// A successful quality prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub quality_score: f64,
    pub prediction: QualityLabel,
    /// Winning class probability as a percentage
    pub confidence: f64,
    pub features: FeatureVector,
    pub rating: Rating,
}

/// Neutral record used when the classifier could not produce a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackPrediction {
    pub quality_score: f64,
    pub prediction: QualityLabel,
    pub confidence: f64,
    pub error: String,
    pub rating: Rating,
}

impl FallbackPrediction {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            quality_score: 50.0,
            prediction: QualityLabel::Unknown,
            confidence: 0.0,
            error: error.into(),
            rating: Rating::C,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionOutcome {
    Scored(PredictionRecord),
    Fallback(FallbackPrediction),
}

impl PredictionOutcome {
    pub fn quality_score(&self) -> f64 {
        match self {
            PredictionOutcome::Scored(record) => record.quality_score,
            PredictionOutcome::Fallback(fallback) => fallback.quality_score,
        }
    }

    pub fn rating(&self) -> Rating {
        match self {
            PredictionOutcome::Scored(record) => record.rating,
            PredictionOutcome::Fallback(fallback) => fallback.rating,
        }
    }

    pub fn label(&self) -> QualityLabel {
        match self {
            PredictionOutcome::Scored(record) => record.prediction,
            PredictionOutcome::Fallback(fallback) => fallback.prediction,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            PredictionOutcome::Scored(record) => record.confidence,
            PredictionOutcome::Fallback(fallback) => fallback.confidence,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PredictionOutcome::Fallback(_))
    }
}

/// Composite result returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub metrics: MetricsRecord,
    pub ml_prediction: PredictionOutcome,
    pub suggestions: Vec<String>,
    pub overall_score: f64,
}
