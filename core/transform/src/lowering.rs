//! Per-compile lowering context handed to every rule.

use indexmap::IndexSet;
use rand::Rng;
use serpent_ast::{
    arena::{ParentIndex, SourceTree},
    nodes::{InputId, InputNode, NodeKind},
};
use serpent_target::tree::{Arg, Emit, Origin, TargetId, TargetTree};
use tracing::trace;

use crate::{
    errors::TransformError, options::TransformOptions, program::Program, registry::RuleRegistry,
};

const NAME_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// State of one compile.
///
/// Owns the output arena being built, the parent index of the input tree and
/// the registered helper snippets. Everything is dropped with the context
/// except what [`finish`](Self::finish) hands over.
pub struct Lowering<'a> {
    registry: &'a RuleRegistry,
    source: &'a SourceTree,
    options: &'a TransformOptions,
    parents: ParentIndex,
    tree: TargetTree,
    snippets: IndexSet<String>,
}

impl<'a> Lowering<'a> {
    #[must_use]
    pub fn new(
        registry: &'a RuleRegistry,
        source: &'a SourceTree,
        options: &'a TransformOptions,
    ) -> Self {
        Self {
            registry,
            source,
            options,
            parents: ParentIndex::build(source),
            tree: TargetTree::new(),
            snippets: IndexSet::new(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &'a SourceTree {
        self.source
    }

    #[must_use]
    pub fn input(&self, id: InputId) -> &'a InputNode {
        &self.source[id]
    }

    #[must_use]
    pub fn tree(&self) -> &TargetTree {
        &self.tree
    }

    /// Adds an unfinalized node to the output tree.
    pub fn node(&mut self, emitter: impl Emit + 'static, args: Vec<Arg>) -> TargetId {
        self.tree.push(Box::new(emitter), args)
    }

    /// Adds a node attributed to `origin` right away.
    ///
    /// Used for nodes that stand for a different input node than the one the
    /// rule was called with.
    pub fn node_at(
        &mut self,
        origin: &InputNode,
        emitter: impl Emit + 'static,
        args: Vec<Arg>,
    ) -> TargetId {
        let id = self.node(emitter, args);
        self.tree.bind_origin(id, origin_of(origin));
        id
    }

    /// Lowers an argument.
    ///
    /// Lists are lowered element-wise, input nodes are dispatched to their
    /// rules, target nodes are finalized in place and everything else is
    /// returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Unsupported`] if an input node is reached
    /// that no rule accepts.
    pub fn lower(&mut self, arg: Arg) -> Result<Arg, TransformError> {
        match arg {
            Arg::List(items) => items
                .into_iter()
                .map(|item| self.lower(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Arg::List),
            Arg::Input(id) => self.dispatch(id).map(Arg::Node),
            Arg::Node(id) => {
                self.finalize(id, None)?;
                Ok(Arg::Node(id))
            }
            other => Ok(other),
        }
    }

    /// Lowers a single input node to a finalized target node.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Unsupported`] if no rule accepts the node or
    /// any node below it.
    pub fn dispatch(&mut self, id: InputId) -> Result<TargetId, TransformError> {
        let registry = self.registry;
        let node = self.input(id);
        for rule in registry.rules_for(node.kind) {
            if let Some(target) = rule(self, node) {
                trace!(input = %node, %target, "rule accepted");
                self.finalize(target, Some(node))?;
                return Ok(target);
            }
        }
        Err(TransformError::unsupported(node))
    }

    /// Computes the transformed arguments of `id` from its raw arguments.
    ///
    /// Only the first call lowers anything. `origin` is bound whenever the node
    /// has none yet.
    ///
    /// # Errors
    ///
    /// Propagates lowering failures of the raw arguments.
    pub fn finalize(&mut self, id: TargetId, origin: Option<&InputNode>) -> Result<(), TransformError> {
        if let Some(origin) = origin {
            self.tree.bind_origin(id, origin_of(origin));
        }
        if self.tree[id].is_finalized() {
            return Ok(());
        }
        let raw = self.tree[id].raw_args().to_vec();
        let transformed = raw
            .into_iter()
            .map(|arg| self.lower(arg))
            .collect::<Result<Vec<_>, _>>()?;
        self.tree.set_transformed(id, transformed);
        Ok(())
    }

    #[must_use]
    pub fn parent_of(&self, node: &InputNode) -> Option<&'a InputNode> {
        self.parents.parent_of(node.id).map(|id| self.input(id))
    }

    /// Nearest ancestor of `node` of the given kind.
    #[must_use]
    pub fn find_parent(&self, node: &InputNode, kind: NodeKind) -> Option<&'a InputNode> {
        self.parents
            .find_ancestor(self.source, node.id, kind)
            .map(|id| self.input(id))
    }

    /// Random alphabetic identifier for synthesized bindings.
    #[must_use]
    pub fn new_name(&self) -> String {
        let mut rng = rand::rng();
        (0..self.options.fresh_name_length)
            .map(|_| char::from(NAME_ALPHABET[rng.random_range(0..NAME_ALPHABET.len())]))
            .collect()
    }

    /// Registers a helper snippet. Identical snippets are kept once.
    pub fn add_snippet(&mut self, code: impl Into<String>) {
        self.snippets.insert(code.into());
    }

    #[must_use]
    pub fn snippets(&self) -> &IndexSet<String> {
        &self.snippets
    }

    /// Ends the compile and hands over the output tree.
    #[must_use]
    pub fn finish(self, root: TargetId) -> Program {
        Program::new(self.tree, root, self.snippets.into_iter().collect())
    }
}

fn origin_of(node: &InputNode) -> Origin {
    Origin {
        input: node.id,
        location: node.location,
    }
}
