//! Code smell detectors
//!
//! Each detector inspects a parsed module and reports zero or more smell
//! descriptions. Detectors are independent of each other; the engine runs
//! them in a fixed order and concatenates their output:
//!
//! 1. long functions
//! 2. too many positional parameters
//! 3. deep nesting (at most one entry)
//! 4. magic numbers (at most one entry, textual match)

mod deep_nesting;
mod long_methods;
mod long_parameter;
mod magic_numbers;

pub use deep_nesting::{max_nesting_depth, DeepNestingDetector};
pub use long_methods::LongMethodsDetector;
pub use long_parameter::{positional_parameter_count, LongParameterListDetector};
pub use magic_numbers::MagicNumbersDetector;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parsers::ParsedModule;

/// Trait for all code smell detectors
pub trait Detector: Send + Sync {
    /// Short kebab-case identifier
    fn name(&self) -> &'static str;

    /// Human-readable description of what the detector looks for
    fn description(&self) -> &'static str;

    /// Smell descriptions found in `module`, empty when clean
    fn detect(&self, module: &ParsedModule) -> Vec<String>;
}

/// Thresholds above which a construct is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmellThresholds {
    /// Functions spanning more lines than this are too long
    pub max_function_lines: usize,
    /// More positional parameters than this is too many
    pub max_parameters: usize,
    /// Control-flow nesting deeper than this is reported
    pub max_nesting_depth: usize,
}

impl Default for SmellThresholds {
    fn default() -> Self {
        Self {
            max_function_lines: 50,
            max_parameters: 5,
            max_nesting_depth: 4,
        }
    }
}

/// Detectors in reporting order
pub fn default_detectors(thresholds: &SmellThresholds) -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(LongMethodsDetector::new(thresholds.max_function_lines)),
        Box::new(LongParameterListDetector::new(thresholds.max_parameters)),
        Box::new(DeepNestingDetector::new(thresholds.max_nesting_depth)),
        Box::new(MagicNumbersDetector::new()),
    ]
}

/// Run every detector and collect their descriptions in order
pub fn detect_smells(module: &ParsedModule, thresholds: &SmellThresholds) -> Vec<String> {
    let mut smells = Vec::new();
    for detector in default_detectors(thresholds) {
        let found = detector.detect(module);
        debug!("{}: {} smell(s)", detector.name(), found.len());
        smells.extend(found);
    }
    smells
}
