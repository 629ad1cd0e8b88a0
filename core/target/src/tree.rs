use core::fmt;
use std::fmt::{Display, Formatter};
use std::ops::Index;

use serpent_ast::nodes::{InputId, Location};

use crate::{line::Emission, serializer::Serializer};

/// Handle of a node inside a [`TargetTree`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TargetId(pub(crate) u32);

impl TargetId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for TargetId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Positional argument of a target node.
///
/// Raw arguments may reference input nodes that still have to be lowered.
/// After finalization every [`Arg::Input`] has been replaced by an
/// [`Arg::Node`].
#[derive(Clone, PartialEq, Debug)]
pub enum Arg {
    None,
    Bool(bool),
    Int(i64),
    Text(String),
    Input(InputId),
    Node(TargetId),
    List(Vec<Arg>),
}

impl Arg {
    #[must_use]
    pub fn as_node(&self) -> Option<TargetId> {
        match self {
            Arg::Node(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Arg::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Arg]> {
        match self {
            Arg::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Arg::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Whether an unlowered input node is reachable from this argument.
    #[must_use]
    pub fn has_input(&self) -> bool {
        match self {
            Arg::Input(_) => true,
            Arg::List(items) => items.iter().any(Arg::has_input),
            _ => false,
        }
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<InputId> for Arg {
    fn from(value: InputId) -> Self {
        Arg::Input(value)
    }
}

impl From<TargetId> for Arg {
    fn from(value: TargetId) -> Self {
        Arg::Node(value)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(value: Vec<T>) -> Self {
        Arg::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::None, Into::into)
    }
}

/// Emission rule of a target node.
///
/// Called with the finalized arguments every time the node is serialized, so
/// implementations must be pure.
pub trait Emit: fmt::Debug {
    fn emit(&self, args: &[Arg]) -> Emission;
}

impl<E: Emit + ?Sized> Emit for Box<E> {
    fn emit(&self, args: &[Arg]) -> Emission {
        (**self).emit(args)
    }
}

/// Input node a target node was lowered from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Origin {
    pub input: InputId,
    pub location: Option<Location>,
}

#[derive(Debug)]
pub struct TargetNode {
    emitter: Box<dyn Emit>,
    raw: Vec<Arg>,
    transformed: Option<Vec<Arg>>,
    origin: Option<Origin>,
}

impl TargetNode {
    #[must_use]
    pub fn raw_args(&self) -> &[Arg] {
        &self.raw
    }

    /// Finalized arguments, `None` until the node has been finalized.
    #[must_use]
    pub fn transformed_args(&self) -> Option<&[Arg]> {
        self.transformed.as_deref()
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.transformed.is_some()
    }

    #[must_use]
    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.origin.and_then(|origin| origin.location)
    }

    #[must_use]
    pub fn emitter(&self) -> &dyn Emit {
        self.emitter.as_ref()
    }

    /// Runs the emission rule over the finalized arguments.
    ///
    /// # Panics
    ///
    /// Panics if the node has not been finalized.
    #[must_use]
    pub fn emit(&self) -> Emission {
        let Some(args) = &self.transformed else {
            panic!("target node emitted before finalization: {:?}", self.emitter);
        };
        self.emitter.emit(args)
    }
}

/// Arena of target nodes produced by one compile.
#[derive(Debug, Default)]
pub struct TargetTree {
    nodes: Vec<TargetNode>,
}

impl TargetTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unfinalized node. Arguments are not inspected here.
    #[allow(clippy::cast_possible_truncation)]
    pub fn push(&mut self, emitter: Box<dyn Emit>, raw: Vec<Arg>) -> TargetId {
        let id = TargetId(self.nodes.len() as u32);
        self.nodes.push(TargetNode {
            emitter,
            raw,
            transformed: None,
            origin: None,
        });
        id
    }

    #[must_use]
    pub fn get(&self, id: TargetId) -> Option<&TargetNode> {
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (TargetId, &TargetNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (TargetId(index as u32), node))
    }

    /// Stores the finalized arguments of `id`.
    ///
    /// # Panics
    ///
    /// Panics if the node already has finalized arguments.
    pub fn set_transformed(&mut self, id: TargetId, args: Vec<Arg>) {
        let node = &mut self.nodes[id.index()];
        assert!(
            node.transformed.is_none(),
            "transformed arguments of {id} are assigned twice"
        );
        node.transformed = Some(args);
    }

    /// Binds `origin` unless the node already has one.
    pub fn bind_origin(&mut self, id: TargetId, origin: Origin) {
        let node = &mut self.nodes[id.index()];
        if node.origin.is_none() {
            node.origin = Some(origin);
        }
    }

    /// Lazily serializes the subtree rooted at `root` into lines.
    #[must_use]
    pub fn serialize(&self, root: TargetId) -> Serializer<'_> {
        Serializer::new(self, root)
    }

    #[must_use]
    pub fn render(&self, root: TargetId) -> String {
        self.serialize(root).map(|line| line.to_string()).collect()
    }
}

impl Index<TargetId> for TargetTree {
    type Output = TargetNode;

    fn index(&self, id: TargetId) -> &TargetNode {
        &self.nodes[id.index()]
    }
}
