//! Tree-sitter based CST parser for Rust source code.

use tree_sitter::{Node, Parser};

/// A point in source code (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Zero-indexed row number
    pub row: usize,
    /// Zero-indexed column (byte offset within line)
    pub column: usize,
}

impl From<tree_sitter::Point> for Point {
    fn from(p: tree_sitter::Point) -> Self {
        Self {
            row: p.row,
            column: p.column,
        }
    }
}

/// A CST node with exact source location
#[derive(Debug, Clone)]
pub struct CstNode {
    /// Node kind (e.g., "function_item", "attribute_item")
    pub kind: String,
    /// Text of the node's `name` field, if it has one
    pub name: Option<String>,
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Start point (row, column)
    pub start_point: Point,
    /// End point (row, column)
    pub end_point: Point,
    /// Child nodes
    pub children: Vec<CstNode>,
}

impl CstNode {
    fn from_ts_node(node: Node<'_>, source: &[u8]) -> Self {
        let mut cursor = node.walk();
        let children = node
            .children(&mut cursor)
            .map(|child| Self::from_ts_node(child, source))
            .collect();

        let name = node
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source).ok())
            .map(str::to_owned);

        Self {
            kind: node.kind().to_owned(),
            name,
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_point: node.start_position().into(),
            end_point: node.end_position().into(),
            children,
        }
    }

    /// Last row holding any of the node's text.
    ///
    /// Line comments own their trailing newline, which puts their end point
    /// at column 0 of the following row.
    #[must_use]
    pub fn last_row(&self) -> usize {
        if self.end_point.column == 0 && self.end_point.row > self.start_point.row {
            self.end_point.row - 1
        } else {
            self.end_point.row
        }
    }

    /// Find all nodes whose kind is one of `kinds`
    #[must_use]
    pub fn find_by_kinds(&self, kinds: &[&str]) -> Vec<&CstNode> {
        let mut result = Vec::new();
        self.find_by_kinds_recursive(kinds, &mut result);
        result
    }

    fn find_by_kinds_recursive<'a>(&'a self, kinds: &[&str], result: &mut Vec<&'a CstNode>) {
        if kinds.contains(&self.kind.as_str()) {
            result.push(self);
        }
        for child in &self.children {
            child.find_by_kinds_recursive(kinds, result);
        }
    }
}

/// A parsed CST tree
#[derive(Debug)]
pub struct CstTree {
    /// Root node of the CST
    pub root: CstNode,
    /// Original source code
    pub source: String,
    /// Whether tree-sitter had to recover from syntax errors
    pub has_errors: bool,
}

impl CstTree {
    /// Extract the source text of `node`
    #[must_use]
    pub fn text(&self, node: &CstNode) -> &str {
        &self.source[node.start_byte..node.end_byte]
    }
}

/// Error during CST parsing
#[derive(Debug, thiserror::Error)]
pub enum CstError {
    /// Failed to create parser
    #[error("failed to create CST parser: {0}")]
    ParserCreation(String),
    /// Failed to parse source
    #[error("failed to parse source as Rust")]
    ParseFailed,
}

/// Tree-sitter based CST parser
pub struct CstParser {
    parser: Parser,
}

impl CstParser {
    /// Create a new CST parser for Rust
    ///
    /// # Errors
    /// Returns error if the grammar cannot be loaded
    pub fn new() -> Result<Self, CstError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|e| CstError::ParserCreation(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse source code into a CST
    ///
    /// # Errors
    /// Returns error if tree-sitter gives up on the input
    pub fn parse(&mut self, source: &str) -> Result<CstTree, CstError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(CstError::ParseFailed)?;
        let ts_root = tree.root_node();

        Ok(CstTree {
            root: CstNode::from_ts_node(ts_root, source.as_bytes()),
            source: source.to_owned(),
            has_errors: ts_root.has_error(),
        })
    }
}
