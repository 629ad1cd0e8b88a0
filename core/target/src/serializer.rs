//! Lazy serialization of a [`TargetTree`] into [`Line`]s.
//!
//! The serializer keeps an explicit stack of pending emission items instead of
//! recursing, and only calls a node's emission rule when the walk reaches it.
//! Every yielded line is fully resolved: node parts are replaced by the
//! fragments they emit, and every fragment carries the node it came from.
//! The emission parent and the visiting order of every node are recorded on
//! the way so that consumers can attribute output to the nearest ancestor with
//! a location.

use std::vec::IntoIter;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{
    line::{Emission, Fragment, Item, Line, Part},
    tree::{TargetId, TargetTree},
};

struct Frame {
    items: IntoIter<Item>,
    indent: u32,
    node: TargetId,
}

pub struct Serializer<'t> {
    tree: &'t TargetTree,
    stack: Vec<Frame>,
    parents: FxHashMap<TargetId, TargetId>,
    visited: Vec<TargetId>,
}

impl<'t> Serializer<'t> {
    pub(crate) fn new(tree: &'t TargetTree, root: TargetId) -> Self {
        Self {
            tree,
            stack: vec![Frame {
                items: vec![Item::nested(root, 0)].into_iter(),
                indent: 0,
                node: root,
            }],
            parents: FxHashMap::default(),
            visited: vec![root],
        }
    }

    /// Node whose emission contained `id`, for every node visited so far.
    #[must_use]
    pub fn parent_of(&self, id: TargetId) -> Option<TargetId> {
        self.parents.get(&id).copied()
    }

    /// Hands out the nodes reached since the last call, parents first.
    pub fn drain_visited(&mut self) -> std::vec::Drain<'_, TargetId> {
        self.visited.drain(..)
    }

    #[must_use]
    pub fn tree(&self) -> &'t TargetTree {
        self.tree
    }

    fn record_parent(&mut self, child: TargetId, parent: TargetId) {
        if child != parent && !self.parents.contains_key(&child) {
            self.parents.insert(child, parent);
            self.visited.push(child);
        }
    }

    fn finish_line(&mut self, mut line: Line, indent: u32, owner: TargetId) -> Line {
        line.indent += indent;
        let origin = *line.origin.get_or_insert(owner);
        self.record_parent(origin, owner);
        let content = std::mem::take(&mut line.content);
        line.content = self.resolve(content, origin);
        line
    }

    fn resolve(&mut self, fragment: Fragment, owner: TargetId) -> Fragment {
        let origin = match fragment.origin {
            Some(origin) => {
                self.record_parent(origin, owner);
                origin
            }
            None => owner,
        };
        let parts = fragment
            .parts
            .into_iter()
            .map(|part| match part {
                Part::Text(text) => Part::Text(text),
                Part::Fragment(inner) => Part::Fragment(self.resolve(inner, origin)),
                Part::Node(id) => Part::Fragment(self.inline(id, origin)),
            })
            .collect();
        Fragment {
            parts,
            origin: Some(origin),
        }
    }

    fn inline(&mut self, id: TargetId, owner: TargetId) -> Fragment {
        self.record_parent(id, owner);
        match self.tree[id].emit() {
            Emission::Inline(fragment) => {
                let fragment = if fragment.origin.is_none() {
                    Fragment {
                        origin: Some(id),
                        ..fragment
                    }
                } else {
                    Fragment {
                        parts: vec![Part::Fragment(fragment)],
                        origin: Some(id),
                    }
                };
                self.resolve(fragment, id)
            }
            Emission::Lines(_) => {
                panic!("{id} emits lines and cannot be inlined: {:?}", self.tree[id].emitter())
            }
        }
    }
}

impl Iterator for Serializer<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some(item) = frame.items.next() else {
                self.stack.pop();
                continue;
            };
            let (indent, owner) = (frame.indent, frame.node);
            match item {
                Item::Line(line) => return Some(self.finish_line(line, indent, owner)),
                Item::Nested { node, indent: extra } => {
                    self.record_parent(node, owner);
                    trace!(%node, depth = self.stack.len(), "emitting nested node");
                    match self.tree[node].emit() {
                        Emission::Lines(items) => self.stack.push(Frame {
                            items: items.into_iter(),
                            indent: indent + extra,
                            node,
                        }),
                        Emission::Inline(fragment) => {
                            let line = Line::new(fragment).attributed_to(node);
                            return Some(self.finish_line(line, indent + extra, node));
                        }
                    }
                }
            }
        }
    }
}
