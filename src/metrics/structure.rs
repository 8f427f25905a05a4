//! Structural counts gathered in a single traversal.
//!
//! `async def` and `async for` are not counted as functions or loops.

use crate::parsers::{is_async, walk_tree, ParsedModule};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureCounts {
    pub functions: usize,
    pub classes: usize,
    pub imports: usize,
    pub loops: usize,
    /// `if` statements plus each `elif` branch
    pub conditionals: usize,
}

pub fn count_structure(module: &ParsedModule) -> StructureCounts {
    let mut counts = StructureCounts::default();
    walk_tree(module.root(), |node| match node.kind() {
        "function_definition" if !is_async(&node) => counts.functions += 1,
        "class_definition" => counts.classes += 1,
        "import_statement" | "import_from_statement" | "future_import_statement" => {
            counts.imports += 1
        }
        "for_statement" if !is_async(&node) => counts.loops += 1,
        "while_statement" => counts.loops += 1,
        "if_statement" | "elif_clause" => counts.conditionals += 1,
        _ => {}
    });
    counts
}
