//! Long methods detector
//!
//! Flags every function whose definition spans more than `max_lines` lines,
//! measured from the `def` line to the line of its last code token.
//! Trailing comments are not part of the span, and `async def` is skipped.

use tree_sitter::Node;

use crate::detectors::Detector;
use crate::parsers::{definition_name, is_async, walk_tree, ParsedModule};

/// Row of the last token of `node` that is not inside a comment
///
/// The grammar folds comments after the last statement into the enclosing
/// block, which would otherwise stretch the span.
fn last_code_row(node: Node) -> usize {
    let mut cursor = node.walk();
    let last = node
        .children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .last();
    match last {
        Some(child) => last_code_row(child),
        None => node.end_position().row,
    }
}

pub struct LongMethodsDetector {
    max_lines: usize,
}

impl LongMethodsDetector {
    pub fn new(max_lines: usize) -> Self {
        Self { max_lines }
    }
}

impl Detector for LongMethodsDetector {
    fn name(&self) -> &'static str {
        "long-methods"
    }

    fn description(&self) -> &'static str {
        "Detects overly long functions"
    }

    fn detect(&self, module: &ParsedModule) -> Vec<String> {
        let mut smells = Vec::new();
        walk_tree(module.root(), |node| {
            if node.kind() != "function_definition" || is_async(&node) {
                return;
            }
            let span = last_code_row(node) - node.start_position().row;
            if span > self.max_lines {
                smells.push(format!(
                    "Long function '{}' ({} lines)",
                    definition_name(&node, module.source()),
                    span
                ));
            }
        });
        smells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_source;

    fn function_with_body(lines: usize) -> String {
        let mut source = String::from("def worker():\n");
        for i in 0..lines {
            source.push_str(&format!("    x{i} = {i}\n"));
        }
        source
    }

    #[test]
    fn test_fifty_one_line_body_is_flagged() {
        let source = function_with_body(51);
        let module = parse_source(&source).expect("valid python");
        let smells = LongMethodsDetector::new(50).detect(&module);
        assert_eq!(smells, vec!["Long function 'worker' (51 lines)".to_string()]);
    }

    #[test]
    fn test_fifty_line_body_is_not_flagged() {
        let source = function_with_body(50);
        let module = parse_source(&source).expect("valid python");
        assert!(LongMethodsDetector::new(50).detect(&module).is_empty());
    }

    #[test]
    fn test_methods_inside_classes_are_checked() {
        let mut source = String::from("class Big:\n    def run(self):\n");
        for _ in 0..60 {
            source.push_str("        pass\n");
        }
        let module = parse_source(&source).expect("valid python");
        let smells = LongMethodsDetector::new(50).detect(&module);
        assert_eq!(smells.len(), 1);
        assert!(smells[0].contains("'run' (60 lines)"));
    }

    #[test]
    fn test_trailing_comment_is_not_counted() {
        let mut source = function_with_body(50);
        source.push_str("    # trailing note\n");
        let module = parse_source(&source).expect("valid python");
        assert!(LongMethodsDetector::new(50).detect(&module).is_empty());

        let mut source = function_with_body(51);
        source.push_str("    # trailing note\n\n");
        let module = parse_source(&source).expect("valid python");
        assert_eq!(
            LongMethodsDetector::new(50).detect(&module),
            vec!["Long function 'worker' (51 lines)".to_string()]
        );
    }

    #[test]
    fn test_async_functions_are_skipped() {
        let mut source = String::from("async def worker():\n");
        for _ in 0..60 {
            source.push_str("    await tick()\n");
        }
        let module = parse_source(&source).expect("valid python");
        assert!(LongMethodsDetector::new(50).detect(&module).is_empty());
    }
}
