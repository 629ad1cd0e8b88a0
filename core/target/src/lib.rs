#![warn(clippy::pedantic)]
//! Output tree model of the Serpent compiler.
//!
//! Target nodes live in a [`TargetTree`] arena and are addressed by
//! [`TargetId`]. Each node carries its raw arguments, the arguments produced by
//! finalization, and an [`Emit`] implementation that turns the finalized
//! arguments into an [`Emission`]. [`TargetTree::serialize`] walks the tree
//! lazily and yields one [`Line`] per physical line of output.
//!
//! ```text
//! TargetTree ──serialize(root)──▶ Serializer ──▶ Line, Line, ...
//! ```
//!
//! [`Emission`]: line::Emission
//! [`Line`]: line::Line
//! [`TargetTree`]: tree::TargetTree
//! [`TargetTree::serialize`]: tree::TargetTree::serialize
//! [`TargetId`]: tree::TargetId
//! [`Emit`]: tree::Emit

pub mod line;
pub mod serializer;
pub mod tree;
