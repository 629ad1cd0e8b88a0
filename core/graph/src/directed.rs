use std::fmt::Debug;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::errors::CyclicGraphError;

/// Directed graph whose arcs point from a node to what it depends on.
///
/// Nodes and arcs keep their insertion order, which makes
/// [`topological_ordering`](Self::topological_ordering) reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectedGraph<T: Hash + Eq> {
    arcs: IndexMap<T, IndexSet<T>>,
}

impl<T: Hash + Eq> Default for DirectedGraph<T> {
    fn default() -> Self {
        Self {
            arcs: IndexMap::new(),
        }
    }
}

impl<T: Hash + Eq + Clone + Debug> DirectedGraph<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` with no dependencies. Does nothing if it is already present.
    pub fn add_node(&mut self, node: T) {
        self.arcs.entry(node).or_default();
    }

    /// Records that `from` depends on `to`, adding both nodes if needed.
    pub fn add_arc(&mut self, from: T, to: T) {
        self.add_node(to.clone());
        self.arcs.entry(from).or_default().insert(to);
    }

    #[must_use]
    pub fn contains(&self, node: &T) -> bool {
        self.arcs.contains_key(node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.arcs.keys()
    }

    #[must_use]
    pub fn dependencies_of(&self, node: &T) -> Option<&IndexSet<T>> {
        self.arcs.get(node)
    }

    /// Orders the nodes so that every node comes after all of its dependencies.
    ///
    /// Works on a copy of the graph. When several nodes can be placed, the one
    /// added first wins.
    ///
    /// # Errors
    ///
    /// Returns [`CyclicGraphError`] with the unplaceable remainder if the graph
    /// has a cycle.
    pub fn topological_ordering(&self) -> Result<Vec<T>, CyclicGraphError<T>> {
        let mut remaining = self.arcs.clone();
        let mut ordering = Vec::with_capacity(remaining.len());
        while !remaining.is_empty() {
            let Some(index) = remaining.values().position(IndexSet::is_empty) else {
                debug!(remaining = remaining.len(), "cycle detected");
                return Err(CyclicGraphError {
                    residual: remaining,
                });
            };
            let Some((node, _)) = remaining.shift_remove_index(index) else {
                unreachable!("index {index} was just found");
            };
            for dependencies in remaining.values_mut() {
                dependencies.shift_remove(&node);
            }
            ordering.push(node);
        }
        Ok(ordering)
    }
}
