//! Builder that converts a tree-sitter concrete syntax tree into a [`SourceTree`].
//!
//! The builder walks the CST depth-first and copies every named node, and every
//! anonymous token bound to a grammar field, into an arena:
//!
//! 1. Map the tree-sitter kind onto [`NodeKind`]
//! 2. Record the source slice and location
//! 3. Recurse into the children with the field name each one is bound to
//!
//! Comments and other extras are skipped. `ERROR` and `MISSING` nodes are
//! collected and reported together once the walk is done:
//!
//! ```text
//! syntax errors in source:
//! invalid syntax at 3:4 near 'def ('
//! ```
//!
//! # Example
//!
//! ```no_run
//! use serpent_ast::builder::Builder;
//!
//! let source = "print('hello')\n";
//! let mut parser = tree_sitter::Parser::new();
//! parser.set_language(&tree_sitter_python::LANGUAGE.into()).unwrap();
//! let tree = parser.parse(source, None).unwrap();
//! let source_tree = Builder::new(source).build(tree.root_node()).unwrap();
//! assert_eq!(source_tree.statements().count(), 1);
//! ```

use tracing::{debug, trace};
use tree_sitter::Node;

use crate::{
    arena::SourceTree,
    errors::AstError,
    nodes::{InputId, InputNode, Location, NodeKind},
};

pub struct Builder<'a> {
    code: &'a str,
    nodes: Vec<InputNode>,
    errors: Vec<String>,
    unrecognized: Option<AstError>,
}

impl<'a> Builder<'a> {
    #[must_use]
    pub fn new(code: &'a str) -> Self {
        Self {
            code,
            nodes: Vec::new(),
            errors: Vec::new(),
            unrecognized: None,
        }
    }

    /// Builds the arena from the CST root.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::Syntax`] if the CST contains error nodes or its root
    /// is not a `module`, and [`AstError::UnrecognizedKind`] if it contains a
    /// production unknown to [`NodeKind`].
    pub fn build(mut self, root: Node<'_>) -> Result<SourceTree, AstError> {
        if root.kind() != "module" {
            self.collect_error(&root);
            return Err(AstError::Syntax {
                errors: self.errors,
            });
        }
        self.build_node(root, None);
        if !self.errors.is_empty() {
            for err in &self.errors {
                debug!(error = %err, "syntax error");
            }
            return Err(AstError::Syntax {
                errors: self.errors,
            });
        }
        if let Some(err) = self.unrecognized {
            return Err(err);
        }
        debug!(nodes = self.nodes.len(), "built source tree");
        Ok(SourceTree {
            nodes: self.nodes,
            code: self.code.to_string(),
        })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn build_node(&mut self, node: Node<'_>, location: Option<Location>) -> InputId {
        let id = InputId(self.nodes.len() as u32);
        let kind = self.get_kind(&node);
        let text = self.code[node.byte_range()].to_string();
        trace!(%id, %kind, "building node");
        self.nodes
            .push(InputNode::new(id, kind, text, location, Vec::new()));

        let mut children = Vec::new();
        let mut cursor = node.walk();
        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                let field = cursor.field_name();
                if child.is_error() || child.is_missing() {
                    self.collect_error(&child);
                } else if !child.is_extra() && (child.is_named() || field.is_some()) {
                    let child_id = self.build_node(child, Some(Self::get_location(&child)));
                    children.push((field, child_id));
                }
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }
        self.nodes[id.index()].children = children;
        id
    }

    fn get_kind(&mut self, node: &Node) -> NodeKind {
        if !node.is_named() {
            return NodeKind::Token;
        }
        if let Some(kind) = NodeKind::from_grammar(node.kind()) {
            return kind;
        }
        if self.unrecognized.is_none() {
            let location = Self::get_location(node);
            self.unrecognized = Some(AstError::UnrecognizedKind {
                kind: node.kind().to_string(),
                line: location.line,
                column: location.column,
            });
        }
        NodeKind::Token
    }

    #[allow(clippy::cast_possible_truncation)]
    fn get_location(node: &Node) -> Location {
        let start_position = node.start_position();
        Location {
            offset_start: node.start_byte() as u32,
            offset_end: node.end_byte() as u32,
            line: start_position.row as u32 + 1,
            column: start_position.column as u32,
        }
    }

    fn collect_error(&mut self, node: &Node) {
        let location = Self::get_location(node);
        if node.is_missing() {
            self.errors.push(format!(
                "missing `{}` at {}",
                node.kind(),
                location
            ));
            return;
        }
        let snippet = &self.code[node.byte_range()];
        self.errors.push(format!(
            "invalid syntax at {} near '{}'",
            location,
            snippet.chars().take(30).collect::<String>()
        ));
    }
}
