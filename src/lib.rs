//! pyreview - Python code review service
//!
//! Scores Python source in six stages: metric extraction, smell detection,
//! textual features, a small TF-IDF + random forest classifier, score
//! composition and suggestions. The pipeline is exposed as a library, an
//! HTTP service and a CLI.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod detectors;
pub mod metrics;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod scoring;
pub mod server;
pub mod suggestions;

pub use models::AnalysisReport;
pub use pipeline::{Analyzer, InputError};
