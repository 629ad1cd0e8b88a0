//! Error types for the AST crate.

use thiserror::Error;

/// Errors that can occur while turning Python source into a [`SourceTree`].
///
/// [`SourceTree`]: crate::arena::SourceTree
#[derive(Debug, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum AstError {
    /// The Python grammar could not be loaded into the parser.
    #[error("failed to load the Python grammar: {0}")]
    Grammar(String),

    /// tree-sitter gave up without producing a tree.
    #[error("failed to parse source code")]
    Parse,

    /// The tree contains ERROR or MISSING nodes.
    #[error("syntax errors in source:\n{}", .errors.join("\n"))]
    Syntax { errors: Vec<String> },

    /// The grammar produced a named node this crate does not know about.
    #[error("unrecognized grammar production `{kind}` at {line}:{column}")]
    UnrecognizedKind {
        kind: String,
        line: u32,
        column: u32,
    },
}
