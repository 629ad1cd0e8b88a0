use std::ops::Index;

use rustc_hash::FxHashMap;

use crate::nodes::{InputId, InputNode, NodeKind};

/// Arena holding every node of one parsed source file.
#[derive(Clone, Debug)]
pub struct SourceTree {
    pub(crate) nodes: Vec<InputNode>,
    pub(crate) code: String,
}

impl SourceTree {
    #[must_use]
    pub fn root(&self) -> &InputNode {
        &self.nodes[0]
    }

    #[must_use]
    pub fn get(&self, id: InputId) -> Option<&InputNode> {
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level statements of the module, in source order.
    pub fn statements(&self) -> impl Iterator<Item = &InputNode> {
        self.root().children().map(|id| &self[id])
    }

    /// Children of `node` resolved to nodes.
    pub fn children_of<'t>(&'t self, node: &'t InputNode) -> impl Iterator<Item = &'t InputNode> {
        node.children().map(|id| &self[id])
    }

    pub fn filter_nodes<T: Fn(&InputNode) -> bool>(&self, fn_predicate: T) -> Vec<&InputNode> {
        self.nodes.iter().filter(|node| fn_predicate(node)).collect()
    }

    #[must_use]
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<&InputNode> {
        self.filter_nodes(|node| node.kind == kind)
    }
}

impl Index<InputId> for SourceTree {
    type Output = InputNode;

    fn index(&self, id: InputId) -> &InputNode {
        &self.nodes[id.index()]
    }
}

/// Child-to-parent map over a [`SourceTree`].
///
/// Built by one full traversal from the root. It is meant to live for a single
/// compile and to be dropped afterwards.
#[derive(Clone, Debug, Default)]
pub struct ParentIndex {
    parents: FxHashMap<InputId, InputId>,
}

impl ParentIndex {
    #[must_use]
    pub fn build(tree: &SourceTree) -> Self {
        let mut parents = FxHashMap::default();
        if tree.is_empty() {
            return Self { parents };
        }
        let mut stack = vec![tree.root().id];
        while let Some(id) = stack.pop() {
            for child in tree[id].children() {
                parents.insert(child, id);
                stack.push(child);
            }
        }
        Self { parents }
    }

    #[must_use]
    pub fn parent_of(&self, id: InputId) -> Option<InputId> {
        self.parents.get(&id).copied()
    }

    /// Walks the ancestors of `id` and returns the first one of `kind`.
    #[must_use]
    pub fn find_ancestor(&self, tree: &SourceTree, id: InputId, kind: NodeKind) -> Option<InputId> {
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            if tree[parent].kind == kind {
                return Some(parent);
            }
            current = self.parent_of(parent);
        }
        None
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
