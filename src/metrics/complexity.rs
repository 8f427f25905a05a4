//! Cyclomatic complexity per block
//!
//! Blocks are the outermost function and class definitions of a module (a
//! definition nested in module-level control flow still counts as
//! outermost), and each class is followed by its methods. A function scores
//! 1 plus its own decision points; nested functions and classes are not part
//! of that score. Classes are scored from their methods.

use tree_sitter::Node;

use crate::parsers::{definition_name, ParsedModule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Function,
    Class,
    Method,
}

/// Complexity of one function or class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexityBlock {
    pub name: String,
    pub kind: BlockKind,
    pub complexity: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexityReport {
    pub blocks: Vec<ComplexityBlock>,
    /// Module-level decision points, plus outermost function scores and
    /// the unaveraged score of each class
    pub total_complexity: u32,
}

impl ComplexityReport {
    /// Mean block complexity, 0 without blocks
    pub fn average(&self) -> f64 {
        if self.blocks.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.blocks.iter().map(|b| b.complexity).sum();
        sum as f64 / self.blocks.len() as f64
    }

    /// Highest block complexity, 0 without blocks
    pub fn max(&self) -> u32 {
        self.blocks.iter().map(|b| b.complexity).max().unwrap_or(0)
    }
}

/// Decision points contributed by a single node (children not included)
fn decision_points(node: &Node) -> u32 {
    match node.kind() {
        "if_statement" | "elif_clause" | "conditional_expression" => 1,
        "except_clause" | "except_group_clause" => 1,
        // Each `and`/`or` is a binary node in the grammar
        "boolean_operator" => 1,
        // Comprehension loops and filters
        "for_in_clause" | "if_clause" => 1,
        "case_clause" => 1,
        "for_statement" | "while_statement" => 1 + has_else_clause(node) as u32,
        "try_statement" => has_else_clause(node) as u32,
        _ => 0,
    }
}

fn has_else_clause(node: &Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| child.kind() == "else_clause");
    found
}

/// Decision points below `node` that belong to its own scope.
///
/// Function and class definitions are not entered; they are pushed onto
/// `definitions` to be scored separately.
fn scope_decisions<'t>(node: Node<'t>, definitions: &mut Vec<Node<'t>>) -> u32 {
    let mut total = 0;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let definition = unwrap_decorated(child);
        if matches!(definition.kind(), "function_definition" | "class_definition") {
            definitions.push(definition);
        } else {
            total += decision_points(&child) + scope_decisions(child, definitions);
        }
    }
    total
}

/// The definition wrapped by a decorator list, or the node itself
fn unwrap_decorated(node: Node) -> Node {
    if node.kind() == "decorated_definition" {
        node.child_by_field_name("definition").unwrap_or(node)
    } else {
        node
    }
}

fn function_complexity(node: Node) -> u32 {
    let mut closures = Vec::new();
    let body = node.child_by_field_name("body");
    1 + body
        .map(|body| scope_decisions(body, &mut closures))
        .unwrap_or(0)
}

struct ClassScore<'t> {
    /// 1 plus class-body decisions plus every method score
    real: u32,
    methods: Vec<(Node<'t>, u32)>,
}

impl ClassScore<'_> {
    fn complexity(&self) -> u32 {
        if self.methods.is_empty() {
            return self.real;
        }
        let count = self.methods.len() as u32;
        self.real / count + (count > 1) as u32
    }
}

fn score_class<'t>(node: Node<'t>) -> ClassScore<'t> {
    let mut nested = Vec::new();
    let body_decisions = node
        .child_by_field_name("body")
        .map(|body| scope_decisions(body, &mut nested))
        .unwrap_or(0);

    // Classes nested in a class body are not scored
    let methods: Vec<_> = nested
        .into_iter()
        .filter(|definition| definition.kind() == "function_definition")
        .map(|method| (method, function_complexity(method)))
        .collect();
    let real = 1 + body_decisions + methods.iter().map(|(_, score)| score).sum::<u32>();
    ClassScore { real, methods }
}

fn push_block(
    report: &mut ComplexityReport,
    module: &ParsedModule,
    node: Node,
    kind: BlockKind,
    complexity: u32,
) {
    report.blocks.push(ComplexityBlock {
        name: definition_name(&node, module.source()).to_string(),
        kind,
        complexity,
    });
}

pub fn analyze_complexity(module: &ParsedModule) -> ComplexityReport {
    let mut report = ComplexityReport::default();
    let mut definitions = Vec::new();
    report.total_complexity = scope_decisions(module.root(), &mut definitions);

    for definition in definitions {
        if definition.kind() == "class_definition" {
            let class = score_class(definition);
            report.total_complexity += class.real;
            push_block(&mut report, module, definition, BlockKind::Class, class.complexity());
            for (method, score) in class.methods {
                push_block(&mut report, module, method, BlockKind::Method, score);
            }
        } else {
            let score = function_complexity(definition);
            report.total_complexity += score;
            push_block(&mut report, module, definition, BlockKind::Function, score);
        }
    }
    report
}
