//! Long parameter list detector
//!
//! Counts plain positional parameters only: positional-only parameters
//! (before `/`), `*args`, keyword-only parameters and `**kwargs` are not
//! part of the count. `self` and `cls` are counted like any other name.
//! `async def` functions are not checked.

use tree_sitter::Node;

use crate::detectors::Detector;
use crate::parsers::{definition_name, is_async, walk_tree, ParsedModule};

/// Number of plain positional parameters of a function definition
pub fn positional_parameter_count(function: &Node) -> usize {
    let Some(params) = function.child_by_field_name("parameters") else {
        return 0;
    };

    let mut count = 0;
    let mut cursor = params.walk();
    for child in params.named_children(&mut cursor) {
        match child.kind() {
            "identifier" | "default_parameter" | "typed_default_parameter" => count += 1,
            "typed_parameter" => {
                // `*args: T` and `**kw: T` are typed splats
                let mut inner = child.walk();
                let is_splat = child.named_children(&mut inner).any(|c| {
                    matches!(c.kind(), "list_splat_pattern" | "dictionary_splat_pattern")
                });
                if is_splat {
                    break;
                }
                count += 1;
            }
            // Everything before `/` was positional-only
            "positional_separator" => count = 0,
            // `*`, `*args` and `**kwargs` end the positional section
            "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => break,
            _ => {}
        }
    }
    count
}

pub struct LongParameterListDetector {
    max_params: usize,
}

impl LongParameterListDetector {
    pub fn new(max_params: usize) -> Self {
        Self { max_params }
    }
}

impl Detector for LongParameterListDetector {
    fn name(&self) -> &'static str {
        "long-parameter-list"
    }

    fn description(&self) -> &'static str {
        "Detects functions with too many positional parameters"
    }

    fn detect(&self, module: &ParsedModule) -> Vec<String> {
        let mut smells = Vec::new();
        walk_tree(module.root(), |node| {
            if node.kind() != "function_definition" || is_async(&node) {
                return;
            }
            let count = positional_parameter_count(&node);
            if count > self.max_params {
                smells.push(format!(
                    "Function '{}' has too many parameters ({})",
                    definition_name(&node, module.source()),
                    count
                ));
            }
        });
        smells
    }
}
