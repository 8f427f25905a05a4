//! Python parser using tree-sitter
//!
//! Produces a syntax tree for the metric and smell stages, or a syntax error
//! naming the first offending location.

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

/// Errors produced while parsing Python source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The source is not valid Python
    #[error("{message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// The parser itself could not run
    #[error("parser unavailable: {0}")]
    Parser(String),
}

/// A successfully parsed module borrowing its source text
pub struct ParsedModule<'src> {
    source: &'src str,
    tree: Tree,
}

impl<'src> ParsedModule<'src> {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Source text covered by a node
    pub fn text(&self, node: &Node) -> &'src str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

/// Parse Python source code into a syntax tree
pub fn parse_source(source: &str) -> Result<ParsedModule<'_>, ParseError> {
    let mut parser = Parser::new();
    let language = tree_sitter_python::LANGUAGE;
    parser
        .set_language(&language.into())
        .map_err(|e| ParseError::Parser(format!("failed to set Python language: {e}")))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::Parser("parser returned no tree".to_string()))?;

    if let Some(bad) = first_error_node(tree.root_node()) {
        return Err(syntax_error(&bad));
    }

    Ok(ParsedModule { source, tree })
}

/// Locate the first ERROR or MISSING node in document order
fn first_error_node(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    // has_error() was set but no node carried it; point at the root
    Some(root)
}

fn syntax_error(node: &Node) -> ParseError {
    let position = node.start_position();
    let line = position.row + 1;
    let column = position.column + 1;
    let message = if node.is_missing() {
        format!("expected '{}' (<string>, line {})", node.kind(), line)
    } else {
        format!("invalid syntax (<string>, line {})", line)
    };
    ParseError::Syntax {
        message,
        line,
        column,
    }
}
