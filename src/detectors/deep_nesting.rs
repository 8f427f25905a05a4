//! Deep nesting detector
//!
//! Nesting depth is the number of enclosing `if`, `for`, `while` and `with`
//! statements. An `elif` is an `if` inside the previous branch's `else`, so
//! the k-th `elif` of a chain sits k levels below its `if`, and a final
//! `else` shares the last `elif`'s level. `async for` and `async with` do
//! not nest. Reports at most one smell per module.

use tree_sitter::Node;

use crate::detectors::Detector;
use crate::parsers::{is_async, ParsedModule};

fn is_nesting_statement(node: &Node) -> bool {
    match node.kind() {
        "if_statement" | "while_statement" => true,
        "for_statement" | "with_statement" => !is_async(node),
        _ => false,
    }
}

/// Deepest nesting of control-flow statements below `root`
pub fn max_nesting_depth(root: Node) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        let depth = if is_nesting_statement(&node) {
            depth + 1
        } else {
            depth
        };
        deepest = deepest.max(depth);

        let mut elifs = 0;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            let child_depth = match child.kind() {
                "elif_clause" => {
                    elifs += 1;
                    depth + elifs
                }
                "else_clause" if node.kind() == "if_statement" => depth + elifs,
                _ => depth,
            };
            stack.push((child, child_depth));
        }
    }

    deepest
}

pub struct DeepNestingDetector {
    max_depth: usize,
}

impl DeepNestingDetector {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Detector for DeepNestingDetector {
    fn name(&self) -> &'static str {
        "deep-nesting"
    }

    fn description(&self) -> &'static str {
        "Detects deeply nested control flow"
    }

    fn detect(&self, module: &ParsedModule) -> Vec<String> {
        let depth = max_nesting_depth(module.root());
        if depth > self.max_depth {
            vec![format!("Deeply nested code (depth: {})", depth)]
        } else {
            Vec::new()
        }
    }
}
