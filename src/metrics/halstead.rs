//! Halstead software science metrics.
//!
//! Operators are the operator tokens of arithmetic, boolean, comparison,
//! unary and augmented-assignment expressions; operands are the
//! sub-expressions those operators apply to. An unparenthesized chain such
//! as `a and b and c` is a single operator over all of its operands.

use std::collections::HashSet;

use tracing::debug;

use tree_sitter::Node;

use crate::parsers::{walk_tree, ParsedModule};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HalsteadMetrics {
    /// Distinct operators (n1)
    pub distinct_operators: usize,
    /// Distinct operands (n2)
    pub distinct_operands: usize,
    /// Total operators (N1)
    pub total_operators: usize,
    /// Total operands (N2)
    pub total_operands: usize,
    pub vocabulary: f64,
    pub length: f64,
    pub volume: f64,
    pub difficulty: f64,
}

fn is_operator_node(kind: &str) -> bool {
    matches!(
        kind,
        "binary_operator"
            | "boolean_operator"
            | "comparison_operator"
            | "unary_operator"
            | "not_operator"
            | "augmented_assignment"
    )
}

#[derive(Default)]
struct HalsteadCounts<'s> {
    operators: HashSet<&'s str>,
    operands: HashSet<&'s str>,
    operator_total: usize,
    operand_total: usize,
}

impl<'s> HalsteadCounts<'s> {
    fn process_node(&mut self, node: &Node, module: &ParsedModule<'s>) {
        if !is_operator_node(node.kind()) {
            return;
        }
        if node.kind() == "boolean_operator" {
            self.process_boolean_chain(node, module);
            return;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.is_named() {
                if child.kind() == "comment" {
                    continue;
                }
                self.add_operand(&child, module);
            } else if !matches!(child.kind(), "(" | ")") {
                self.operators.insert(child.kind());
                self.operator_total += 1;
            }
        }
    }

    fn add_operand(&mut self, operand: &Node, module: &ParsedModule<'s>) {
        self.operands.insert(module.text(operand).trim());
        self.operand_total += 1;
    }

    fn process_boolean_chain(&mut self, node: &Node, module: &ParsedModule<'s>) {
        let operator = boolean_operator_kind(node);
        // Inner links were counted with the head of their chain
        if let Some(parent) = node.parent() {
            if continues_chain(&parent, operator)
                && parent.child_by_field_name("left").as_ref() == Some(node)
            {
                return;
            }
        }

        let mut operands = Vec::new();
        let mut link = *node;
        loop {
            if let Some(right) = link.child_by_field_name("right") {
                operands.push(right);
            }
            match link.child_by_field_name("left") {
                Some(left) if continues_chain(&left, operator) => link = left,
                Some(left) => {
                    operands.push(left);
                    break;
                }
                None => break,
            }
        }

        if let Some(operator) = operator {
            self.operators.insert(operator);
            self.operator_total += 1;
        }
        for operand in operands.iter().rev() {
            self.add_operand(operand, module);
        }
    }

    fn into_metrics(self) -> HalsteadMetrics {
        compute_halstead(
            self.operators.len(),
            self.operands.len(),
            self.operator_total,
            self.operand_total,
        )
    }
}

/// `and` or `or` of a boolean operator node
fn boolean_operator_kind(node: &Node) -> Option<&'static str> {
    node.child_by_field_name("operator").map(|op| op.kind())
}

fn continues_chain(node: &Node, operator: Option<&'static str>) -> bool {
    node.kind() == "boolean_operator" && boolean_operator_kind(node) == operator
}

/// Derive the Halstead measures from raw operator/operand counts
pub fn compute_halstead(n1: usize, n2: usize, big_n1: usize, big_n2: usize) -> HalsteadMetrics {
    let vocabulary = (n1 + n2) as f64;
    let length = (big_n1 + big_n2) as f64;

    let volume = if vocabulary > 0.0 && length > 0.0 {
        length * vocabulary.log2()
    } else {
        0.0
    };
    let difficulty = if n2 > 0 {
        (n1 as f64 / 2.0) * (big_n2 as f64 / n2 as f64)
    } else {
        0.0
    };

    HalsteadMetrics {
        distinct_operators: n1,
        distinct_operands: n2,
        total_operators: big_n1,
        total_operands: big_n2,
        vocabulary,
        length,
        volume,
        difficulty,
    }
}

pub fn analyze_halstead(module: &ParsedModule) -> HalsteadMetrics {
    let mut counts = HalsteadCounts::default();
    walk_tree(module.root(), |node| counts.process_node(&node, module));
    let metrics = counts.into_metrics();
    debug!(
        "Halstead: n1={} n2={} N1={} N2={} volume={:.2}",
        metrics.distinct_operators,
        metrics.distinct_operands,
        metrics.total_operators,
        metrics.total_operands,
        metrics.volume
    );
    metrics
}
