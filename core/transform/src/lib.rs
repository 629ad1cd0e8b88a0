#![warn(clippy::pedantic)]
//! Transformation engine of the Serpent compiler.
//!
//! A [`RuleRegistry`] maps every input node kind to an ordered list of
//! [`Rule`]s. [`Transformer::transform_tree`] lowers the top-level statements
//! of a [`SourceTree`] one by one: for each input node the registered rules are
//! tried in order and the first one returning a node wins. The winning node is
//! then finalized, which recursively lowers every input node found among its
//! raw arguments.
//!
//! ```text
//! SourceTree ─▶ Lowering::lower ─▶ rules_for(kind) ─▶ first Some(node)
//!                    ▲                                      │
//!                    └──────────── finalize(node) ◀─────────┘
//! ```
//!
//! [`SourceTree`]: serpent_ast::arena::SourceTree
//! [`Transformer::transform_tree`]: transformer::Transformer::transform_tree
//! [`RuleRegistry`]: registry::RuleRegistry
//! [`Rule`]: registry::Rule

pub mod errors;
pub mod lowering;
pub mod options;
pub mod program;
pub mod registry;
pub mod transformer;
