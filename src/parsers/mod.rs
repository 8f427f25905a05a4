//! Source parsing using tree-sitter
//!
//! Only Python is analyzed; the parser module exposes the parsed syntax tree
//! together with helpers shared by the metric and smell stages.

pub mod python;

pub use python::{parse_source, ParseError, ParsedModule};

use std::collections::VecDeque;
use tree_sitter::Node;

/// Visit every node below `root` (inclusive), breadth-first.
///
/// Nodes at the same depth are visited left to right, so definitions are
/// reported outer before inner, in source order.
pub fn walk_tree<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>)) {
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        visit(node);
        let mut cursor = node.walk();
        queue.extend(node.children(&mut cursor));
    }
}

/// Name of a function or class definition node
pub fn definition_name<'s>(node: &Node, source: &'s str) -> &'s str {
    node.child_by_field_name("name")
        .and_then(|name| name.utf8_text(source.as_bytes()).ok())
        .unwrap_or("<anonymous>")
}

/// True for `async def`, `async for` and `async with` nodes
pub fn is_async(node: &Node) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}
