//! Analysis pipeline
//!
//! Runs every stage over one piece of source:
//! 1. Extract metrics and detect smells
//! 2. Extract textual features and classify
//! 3. Compose the quality score
//! 4. Generate suggestions
//!
//! An [`Analyzer`] owns the trained classifier and is shared read-only
//! between requests.

use thiserror::Error;
use tracing::{debug, info};

use crate::classifier::{ClassifierError, QualityClassifier};
use crate::detectors::SmellThresholds;
use crate::metrics::extract_metrics;
use crate::models::AnalysisReport;
use crate::scoring::ScoreComposer;
use crate::suggestions::generate_suggestions;

/// Input rejected before any analysis runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Only Python files (.py) are supported")]
    UnsupportedExtension { filename: String },

    #[error("No code provided")]
    EmptyInput,

    #[error("'{filename}' is not valid UTF-8: {reason}")]
    InvalidUtf8 { filename: String, reason: String },
}

impl InputError {
    /// Caller mistakes, as opposed to content that failed to decode
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            InputError::UnsupportedExtension { .. } | InputError::EmptyInput
        )
    }
}

pub fn default_extensions() -> Vec<String> {
    vec![".py".to_string()]
}

/// Full scoring pipeline around a trained classifier
#[derive(Debug, Clone)]
pub struct Analyzer {
    classifier: QualityClassifier,
    thresholds: SmellThresholds,
    allowed_extensions: Vec<String>,
}

impl Analyzer {
    pub fn new(classifier: QualityClassifier) -> Self {
        Self {
            classifier,
            thresholds: SmellThresholds::default(),
            allowed_extensions: default_extensions(),
        }
    }

    /// Train the built-in classifier and wrap it
    pub fn bootstrap() -> Result<Self, ClassifierError> {
        Ok(Self::new(QualityClassifier::bootstrap()?))
    }

    pub fn with_thresholds(mut self, thresholds: SmellThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_allowed_extensions(mut self, extensions: Vec<String>) -> Self {
        self.allowed_extensions = extensions;
        self
    }

    /// Run all stages; never fails
    pub fn analyze(&self, code: &str) -> AnalysisReport {
        let metrics = extract_metrics(code, &self.thresholds);
        let ml_prediction = ScoreComposer::new(&self.classifier).predict(code, metrics.metrics());
        let suggestions = generate_suggestions(&metrics);
        let overall_score = ml_prediction.quality_score();

        debug!(
            "analysis: loc={} score={:.2} rating={} suggestions={}",
            metrics.lines_of_code(),
            overall_score,
            ml_prediction.rating(),
            suggestions.len()
        );

        AnalysisReport {
            filename: None,
            metrics,
            ml_prediction,
            suggestions,
            overall_score,
        }
    }

    /// Analyze pasted source; empty input is rejected
    pub fn analyze_text(&self, code: &str) -> Result<AnalysisReport, InputError> {
        if code.is_empty() {
            return Err(InputError::EmptyInput);
        }
        Ok(self.analyze(code))
    }

    pub fn check_extension(&self, filename: &str) -> Result<(), InputError> {
        if self
            .allowed_extensions
            .iter()
            .any(|ext| filename.ends_with(ext.as_str()))
        {
            Ok(())
        } else {
            Err(InputError::UnsupportedExtension {
                filename: filename.to_string(),
            })
        }
    }

    /// Analyze an uploaded file: extension check, UTF-8 decode, analysis
    pub fn analyze_upload(
        &self,
        filename: &str,
        content: &[u8],
    ) -> Result<AnalysisReport, InputError> {
        self.check_extension(filename)?;
        let code = std::str::from_utf8(content).map_err(|e| InputError::InvalidUtf8 {
            filename: filename.to_string(),
            reason: e.to_string(),
        })?;

        info!("Analyzing upload '{}' ({} bytes)", filename, content.len());
        let mut report = self.analyze(code);
        report.filename = Some(filename.to_string());
        Ok(report)
    }
}
