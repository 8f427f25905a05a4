//! Raw size metrics: physical, logical and source lines, comments, blanks.

use std::collections::BTreeSet;

use crate::parsers::{walk_tree, ParsedModule};

/// Line counts for one module
///
/// `lines_of_code == source_lines + blank + single_comments + multi` holds
/// for every module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawMetrics {
    pub lines_of_code: usize,
    pub logical_lines: usize,
    pub source_lines: usize,
    /// Lines carrying a comment, inline comments included
    pub comments: usize,
    /// Lines holding nothing but a comment
    pub single_comments: usize,
    /// Lines occupied by standalone multi-line strings (docstrings)
    pub multi: usize,
    pub blank: usize,
}

impl RawMetrics {
    /// Comments per physical line, 0 for an empty module
    pub fn comment_ratio(&self) -> f64 {
        if self.lines_of_code > 0 {
            self.comments as f64 / self.lines_of_code as f64
        } else {
            0.0
        }
    }
}

/// Node kinds that open a logical line on their own
fn is_logical_line(kind: &str) -> bool {
    kind.ends_with("_statement")
        || matches!(
            kind,
            "function_definition"
                | "class_definition"
                | "elif_clause"
                | "else_clause"
                | "except_clause"
                | "except_group_clause"
                | "finally_clause"
                | "case_clause"
        )
}

/// A statement consisting of a single string literal spanning several lines
fn is_multiline_string_statement(node: &tree_sitter::Node) -> bool {
    if node.kind() != "expression_statement" || node.named_child_count() != 1 {
        return false;
    }
    let spans_lines = node.end_position().row > node.start_position().row;
    node.named_child(0)
        .map(|child| matches!(child.kind(), "string" | "concatenated_string"))
        .unwrap_or(false)
        && spans_lines
}

pub fn raw_metrics(module: &ParsedModule) -> RawMetrics {
    let lines: Vec<&str> = module.source().lines().collect();

    let mut comment_rows = BTreeSet::new();
    let mut multi_rows = BTreeSet::new();
    let mut logical_lines = 0;

    walk_tree(module.root(), |node| {
        let kind = node.kind();
        if kind == "comment" {
            comment_rows.insert(node.start_position().row);
        } else if is_logical_line(kind) {
            logical_lines += 1;
        }
        if is_multiline_string_statement(&node) {
            multi_rows.extend(node.start_position().row..=node.end_position().row);
        }
    });

    let mut blank = 0;
    let mut single_comments = 0;
    for (row, line) in lines.iter().enumerate() {
        if multi_rows.contains(&row) {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            blank += 1;
        } else if trimmed.starts_with('#') {
            single_comments += 1;
        }
    }

    let lines_of_code = lines.len();
    let multi = multi_rows.iter().filter(|row| **row < lines_of_code).count();
    let source_lines = lines_of_code.saturating_sub(blank + single_comments + multi);

    RawMetrics {
        lines_of_code,
        logical_lines,
        source_lines,
        comments: comment_rows.len(),
        single_comments,
        multi,
        blank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_source;

    fn raw(source: &str) -> RawMetrics {
        raw_metrics(&parse_source(source).expect("valid python"))
    }

    #[test]
    fn test_counts_blank_and_comment_lines() {
        let source = "# header\nimport os\n\nx = 1  # inline\n\n";
        let m = raw(source);
        assert_eq!(m.lines_of_code, 5);
        assert_eq!(m.blank, 2);
        assert_eq!(m.comments, 2);
        assert_eq!(m.single_comments, 1);
        assert_eq!(m.source_lines, 2);
        assert_eq!(m.logical_lines, 2);
    }

    #[test]
    fn test_docstring_lines_are_multi() {
        let source = "def f():\n    \"\"\"Line one.\n\n    Line three.\n    \"\"\"\n    return 1\n";
        let m = raw(source);
        assert_eq!(m.lines_of_code, 6);
        assert_eq!(m.multi, 4);
        assert_eq!(m.blank, 0);
        assert_eq!(m.source_lines, 2);
        assert_eq!(
            m.lines_of_code,
            m.source_lines + m.blank + m.single_comments + m.multi
        );
    }

    #[test]
    fn test_comment_ratio_guards_empty_input() {
        let m = raw("");
        assert_eq!(m.lines_of_code, 0);
        assert_eq!(m.comment_ratio(), 0.0);
    }

    #[test]
    fn test_compound_statement_headers_are_logical_lines() {
        let source = "if x:\n    y = 1\nelse:\n    y = 2\n";
        let m = raw(source);
        // if, assignment, else, assignment
        assert_eq!(m.logical_lines, 4);
    }
}
