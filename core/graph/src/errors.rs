use std::fmt::Debug;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

/// Returned by [`DirectedGraph::topological_ordering`] when no node can be
/// placed while nodes remain.
///
/// [`DirectedGraph::topological_ordering`]: crate::DirectedGraph::topological_ordering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dependency graph contains a cycle: {}", describe(.residual))]
pub struct CyclicGraphError<T: Hash + Eq + Debug> {
    /// What was left of the graph when ordering got stuck: every remaining node
    /// with the dependencies it still waits for.
    pub residual: IndexMap<T, IndexSet<T>>,
}

impl<T: Hash + Eq + Debug> CyclicGraphError<T> {
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.residual.keys()
    }
}

fn describe<T: Debug>(residual: &IndexMap<T, IndexSet<T>>) -> String {
    residual
        .iter()
        .map(|(node, deps)| format!("{node:?} -> {deps:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}
