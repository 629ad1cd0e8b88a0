//! Building blocks returned by emission rules.
//!
//! An [`Emission`] is either an inline [`Fragment`] (expressions) or a list of
//! [`Item`]s (statements). A [`Line`] always renders to exactly one
//! newline-terminated line of output; fragments never contain line breaks.

use core::fmt;
use std::fmt::{Display, Formatter};

use crate::tree::{Arg, TargetId};

/// Width of one indent level.
pub const INDENT: &str = "    ";

/// Piece of a fragment.
#[derive(Clone, PartialEq, Debug)]
pub enum Part {
    Text(String),
    Fragment(Fragment),
    /// Resolved to the node's inline emission during serialization.
    Node(TargetId),
}

impl From<&str> for Part {
    fn from(value: &str) -> Self {
        Part::Text(value.to_string())
    }
}

impl From<String> for Part {
    fn from(value: String) -> Self {
        Part::Text(value)
    }
}

impl From<Fragment> for Part {
    fn from(value: Fragment) -> Self {
        Part::Fragment(value)
    }
}

impl From<TargetId> for Part {
    fn from(value: TargetId) -> Self {
        Part::Node(value)
    }
}

impl From<&Arg> for Part {
    /// # Panics
    ///
    /// Panics on [`Arg::Input`]: emission rules only ever see finalized
    /// arguments.
    fn from(value: &Arg) -> Self {
        match value {
            Arg::None => Part::from("null"),
            Arg::Bool(value) => Part::Text(value.to_string()),
            Arg::Int(value) => Part::Text(value.to_string()),
            Arg::Text(text) => Part::Text(text.clone()),
            Arg::Node(id) => Part::Node(*id),
            Arg::List(items) => Part::Fragment(Fragment::join(", ", items.iter())),
            Arg::Input(id) => panic!("input node {id} reached emission without being lowered"),
        }
    }
}

impl From<Arg> for Part {
    fn from(value: Arg) -> Self {
        Part::from(&value)
    }
}

impl Display for Part {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Part::Text(text) => f.write_str(text),
            Part::Fragment(fragment) => write!(f, "{fragment}"),
            Part::Node(id) => write!(f, "{id}"),
        }
    }
}

/// Inline sequence of parts, optionally attributed to the node that produced it.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Fragment {
    pub parts: Vec<Part>,
    pub origin: Option<TargetId>,
}

impl Fragment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            parts,
            origin: None,
        }
    }

    pub fn push(&mut self, part: impl Into<Part>) {
        self.parts.push(part.into());
    }

    #[must_use]
    pub fn with(mut self, part: impl Into<Part>) -> Self {
        self.push(part);
        self
    }

    /// Interleaves `items` with `separator`.
    pub fn join<I>(separator: &str, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Part>,
    {
        let mut fragment = Fragment::new();
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                fragment.push(separator);
            }
            fragment.push(item);
        }
        fragment
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for part in &self.parts {
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl From<&str> for Fragment {
    fn from(value: &str) -> Self {
        Fragment::from_parts(vec![Part::from(value)])
    }
}

impl From<String> for Fragment {
    fn from(value: String) -> Self {
        Fragment::from_parts(vec![Part::Text(value)])
    }
}

impl From<TargetId> for Fragment {
    fn from(value: TargetId) -> Self {
        Fragment::from_parts(vec![Part::Node(value)])
    }
}

impl From<&Arg> for Fragment {
    fn from(value: &Arg) -> Self {
        match Part::from(value) {
            Part::Fragment(fragment) => fragment,
            part => Fragment::from_parts(vec![part]),
        }
    }
}

impl From<Vec<Part>> for Fragment {
    fn from(value: Vec<Part>) -> Self {
        Fragment::from_parts(value)
    }
}

/// Builds a [`Fragment`] from anything convertible into a [`Part`].
///
/// ```
/// use serpent_target::{fragment, line::Fragment};
///
/// let call = fragment!["f", "(", "x", ")"];
/// assert_eq!(call.to_string(), "f(x)");
/// ```
#[macro_export]
macro_rules! fragment {
    () => {
        $crate::line::Fragment::new()
    };
    ($($part:expr),+ $(,)?) => {
        $crate::line::Fragment::from_parts(vec![$($crate::line::Part::from($part)),+])
    };
}

/// One physical line of output.
#[derive(Clone, PartialEq, Debug)]
pub struct Line {
    pub indent: u32,
    pub delimited: bool,
    pub content: Fragment,
    /// Node the line is attributed to. Stamped with the emitting node by the
    /// serializer when left empty.
    pub origin: Option<TargetId>,
}

impl Line {
    pub fn new(content: impl Into<Fragment>) -> Self {
        Self {
            indent: 0,
            delimited: false,
            content: content.into(),
            origin: None,
        }
    }

    #[must_use]
    pub fn indent(mut self, level: u32) -> Self {
        self.indent = level;
        self
    }

    /// Adds `level` to the current indent.
    #[must_use]
    pub fn indented_by(mut self, level: u32) -> Self {
        self.indent += level;
        self
    }

    /// Terminates the line with `;`.
    #[must_use]
    pub fn delimited(mut self) -> Self {
        self.delimited = true;
        self
    }

    #[must_use]
    pub fn attributed_to(mut self, node: TargetId) -> Self {
        self.origin = Some(node);
        self
    }

    /// Column at which the content starts.
    #[must_use]
    pub fn content_offset(&self) -> usize {
        self.indent as usize * INDENT.len()
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for _ in 0..self.indent {
            f.write_str(INDENT)?;
        }
        write!(f, "{}", self.content)?;
        if self.delimited {
            f.write_str(";")?;
        }
        f.write_str("\n")
    }
}

/// Entry of a statement-shaped emission.
#[derive(Clone, PartialEq, Debug)]
pub enum Item {
    Line(Line),
    /// Splices the lines of `node` here, shifted by `indent` levels.
    Nested { node: TargetId, indent: u32 },
}

impl Item {
    #[must_use]
    pub fn nested(node: TargetId, indent: u32) -> Self {
        Item::Nested { node, indent }
    }

    /// Nests every node of a finalized argument.
    ///
    /// # Panics
    ///
    /// Panics if the argument holds anything other than nodes.
    #[must_use]
    pub fn block(arg: &Arg, indent: u32) -> Vec<Item> {
        match arg {
            Arg::Node(node) => vec![Item::nested(*node, indent)],
            Arg::List(items) => items
                .iter()
                .flat_map(|item| Item::block(item, indent))
                .collect(),
            Arg::None => Vec::new(),
            other => panic!("expected lowered statements, found {other:?}"),
        }
    }
}

impl From<Line> for Item {
    fn from(value: Line) -> Self {
        Item::Line(value)
    }
}

/// Result of running an emission rule.
#[derive(Clone, PartialEq, Debug)]
pub enum Emission {
    Inline(Fragment),
    Lines(Vec<Item>),
}

impl Emission {
    pub fn inline(fragment: impl Into<Fragment>) -> Self {
        Emission::Inline(fragment.into())
    }

    #[must_use]
    pub fn lines(items: Vec<Item>) -> Self {
        Emission::Lines(items)
    }

    #[must_use]
    pub fn empty() -> Self {
        Emission::Lines(Vec::new())
    }
}
