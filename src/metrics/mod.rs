//! Metric extraction stage
//!
//! Parses a module once and derives raw line counts, per-block cyclomatic
//! complexity, Halstead measures, the maintainability index, structural
//! counts and code smells from the same tree.

pub mod complexity;
pub mod halstead;
pub mod maintainability;
pub mod raw;
pub mod structure;

pub use complexity::{analyze_complexity, BlockKind, ComplexityBlock, ComplexityReport};
pub use halstead::{analyze_halstead, compute_halstead, HalsteadMetrics};
pub use maintainability::{comment_percentage, maintainability_index};
pub use raw::{raw_metrics, RawMetrics};
pub use structure::{count_structure, StructureCounts};

use tracing::{debug, warn};

use crate::detectors::{detect_smells, SmellThresholds};
use crate::models::{round2, CodeMetrics, MetricsRecord};
use crate::parsers::{parse_source, ParseError, ParsedModule};

/// Run the full metric stage over `source`
///
/// Never fails: unparsable input yields [`MetricsRecord::Failed`] with
/// `lines_of_code = 0` and no smell detection.
pub fn extract_metrics(source: &str, thresholds: &SmellThresholds) -> MetricsRecord {
    let module = match parse_source(source) {
        Ok(module) => module,
        Err(ParseError::Syntax { message, .. }) => {
            warn!("Syntax error: {}", message);
            return MetricsRecord::syntax_error(message);
        }
        Err(e @ ParseError::Parser(_)) => {
            warn!("Analysis error: {}", e);
            return MetricsRecord::Failed {
                error: "Analysis error".to_string(),
                message: e.to_string(),
                lines_of_code: 0,
            };
        }
    };

    MetricsRecord::Analyzed(metrics_for_module(&module, thresholds))
}

fn metrics_for_module(module: &ParsedModule, thresholds: &SmellThresholds) -> CodeMetrics {
    let raw = raw_metrics(module);
    let complexity = analyze_complexity(module);
    let halstead = analyze_halstead(module);
    let mi = maintainability_index(
        halstead.volume,
        complexity.total_complexity,
        raw.logical_lines,
        comment_percentage(&raw),
    );
    let structure = count_structure(module);
    let code_smells = detect_smells(module, thresholds);

    debug!(
        "metrics: loc={} lloc={} blocks={} mi={:.2} smells={}",
        raw.lines_of_code,
        raw.logical_lines,
        complexity.blocks.len(),
        mi,
        code_smells.len()
    );

    CodeMetrics {
        lines_of_code: raw.lines_of_code,
        logical_lines: raw.logical_lines,
        source_lines: raw.source_lines,
        comments: raw.comments,
        blank_lines: raw.blank,
        comment_ratio: raw.comment_ratio(),
        avg_complexity: round2(complexity.average()),
        max_complexity: complexity.max(),
        maintainability_index: round2(mi),
        halstead_volume: round2(halstead.volume),
        halstead_difficulty: round2(halstead.difficulty),
        num_functions: structure.functions,
        num_classes: structure.classes,
        num_imports: structure.imports,
        num_loops: structure.loops,
        num_conditionals: structure.conditionals,
        code_smells,
    }
}
