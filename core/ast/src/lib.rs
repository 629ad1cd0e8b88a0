#![warn(clippy::pedantic)]
//! Python input tree for the Serpent compiler.
//!
//! Source text is parsed with tree-sitter and the `tree-sitter-python` grammar,
//! then copied into a flat arena ([`SourceTree`]) of immutable [`InputNode`]s.
//! Rules of the transformation engine receive references into this arena.
//!
//! ```rust,no_run
//! let tree = serpent_ast::parse("x = 1\nprint(x)\n")?;
//! assert_eq!(tree.statements().count(), 2);
//! # Ok::<(), serpent_ast::errors::AstError>(())
//! ```
//!
//! [`SourceTree`]: arena::SourceTree
//! [`InputNode`]: nodes::InputNode

pub mod arena;
pub mod builder;
pub mod errors;
pub mod nodes;

use crate::{arena::SourceTree, builder::Builder, errors::AstError};

/// Parses Python source code into a [`SourceTree`].
///
/// # Errors
///
/// Returns an [`AstError`] if the grammar cannot be loaded, tree-sitter gives
/// up, or the source contains syntax errors.
pub fn parse(source_code: &str) -> Result<SourceTree, AstError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| AstError::Grammar(e.to_string()))?;
    let tree = parser.parse(source_code, None).ok_or(AstError::Parse)?;
    Builder::new(source_code).build(tree.root_node())
}
