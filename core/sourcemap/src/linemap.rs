//! Per-character attribution of generated code.
//!
//! [`LineMapBuilder`] serializes a target tree and, in the same pass, records
//! for every output character the id of the [`MappingEntry`] it is attributed
//! to. A node with a location gets its own entry; a node without one inherits
//! the attribution of the node whose emission contains it. The root inherits
//! nothing.

use rustc_hash::FxHashMap;
use serde::Serialize;
use serpent_target::{
    line::{Fragment, INDENT, Line, Part},
    serializer::Serializer,
    tree::{TargetId, TargetTree},
};
use tracing::debug;

/// Attribution of output characters to an input position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub id: u32,
    /// Key of the source file in the catalog.
    pub file: String,
    /// 0-based input line.
    pub line: u32,
    /// 0-based input column.
    pub column: u32,
}

/// Result of a [`LineMapBuilder`] run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineMapping {
    /// One row per output line, one slot per character including the newline.
    pub rows: Vec<Vec<Option<u32>>>,
    /// Entries in id order.
    pub entries: Vec<MappingEntry>,
    /// The generated code.
    pub code: String,
    first_id: u32,
}

impl LineMapping {
    /// Entry with the given id, if it was allocated by this run.
    #[must_use]
    pub fn entry(&self, id: u32) -> Option<&MappingEntry> {
        let index = id.checked_sub(self.first_id)?;
        self.entries.get(index as usize)
    }

    /// Id the next run should start from to keep ids unique across units.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_id(&self) -> u32 {
        self.first_id + self.entries.len() as u32
    }

    /// Entry attributed to the character at (`row`, `column`).
    #[must_use]
    pub fn lookup(&self, row: usize, column: usize) -> Option<&MappingEntry> {
        let id = (*self.rows.get(row)?.get(column)?)?;
        self.entry(id)
    }
}

pub struct LineMapBuilder<'t> {
    tree: &'t TargetTree,
    file: String,
    next_id: u32,
    first_id: u32,
    entries: Vec<MappingEntry>,
    own_ids: FxHashMap<TargetId, u32>,
    attributions: FxHashMap<TargetId, Option<u32>>,
}

impl<'t> LineMapBuilder<'t> {
    #[must_use]
    pub fn new(tree: &'t TargetTree, file: impl Into<String>) -> Self {
        Self {
            tree,
            file: file.into(),
            next_id: 0,
            first_id: 0,
            entries: Vec::new(),
            own_ids: FxHashMap::default(),
            attributions: FxHashMap::default(),
        }
    }

    /// Starts allocating ids at `id` instead of zero.
    #[must_use]
    pub fn with_first_id(mut self, id: u32) -> Self {
        self.next_id = id;
        self.first_id = id;
        self
    }

    #[must_use]
    pub fn build(mut self, root: TargetId) -> LineMapping {
        let tree = self.tree;
        let mut serializer = tree.serialize(root);
        let mut rows = Vec::new();
        let mut code = String::new();
        while let Some(line) = serializer.next() {
            self.attribute_visited(&mut serializer);
            self.push_rows(&line, &mut rows);
            code.push_str(&line.to_string());
        }
        // Nodes reached after the last line emit nothing but still get entries.
        self.attribute_visited(&mut serializer);
        debug!(rows = rows.len(), entries = self.entries.len(), "built line map");
        LineMapping {
            rows,
            entries: self.entries,
            code,
            first_id: self.first_id,
        }
    }

    fn attribute_visited(&mut self, serializer: &mut Serializer<'_>) {
        let visited: Vec<TargetId> = serializer.drain_visited().collect();
        for node in visited {
            let inherited = serializer
                .parent_of(node)
                .and_then(|parent| self.attributions.get(&parent).copied().flatten());
            let attribution = self.mapping_id(node).or(inherited);
            self.attributions.insert(node, attribution);
        }
    }

    /// Id of the entry for `node` itself, allocated on first request.
    fn mapping_id(&mut self, node: TargetId) -> Option<u32> {
        if let Some(id) = self.own_ids.get(&node) {
            return Some(*id);
        }
        let location = self.tree[node].location()?;
        let id = self.next_id;
        self.next_id += 1;
        self.own_ids.insert(node, id);
        self.entries.push(MappingEntry {
            id,
            file: self.file.clone(),
            line: location.line.saturating_sub(1),
            column: location.column,
        });
        Some(id)
    }

    fn attribution_of(&self, node: Option<TargetId>) -> Option<u32> {
        node.and_then(|node| self.attributions.get(&node).copied().flatten())
    }

    /// Appends the rows of `line`. Text that contains a newline closes the
    /// current row at that character.
    fn push_rows(&self, line: &Line, rows: &mut Vec<Vec<Option<u32>>>) {
        let id = self.attribution_of(line.origin);
        let mut row = Vec::new();
        row.extend(std::iter::repeat_n(id, line.indent as usize * INDENT.len()));
        self.fragment(&line.content, &mut row, rows);
        if line.delimited {
            row.push(id);
        }
        row.push(id);
        rows.push(row);
    }

    fn fragment(
        &self,
        fragment: &Fragment,
        row: &mut Vec<Option<u32>>,
        rows: &mut Vec<Vec<Option<u32>>>,
    ) {
        let id = self.attribution_of(fragment.origin);
        for part in &fragment.parts {
            match part {
                Part::Text(text) => {
                    for ch in text.chars() {
                        row.push(id);
                        if ch == '\n' {
                            rows.push(std::mem::take(row));
                        }
                    }
                }
                Part::Fragment(inner) => self.fragment(inner, row, rows),
                Part::Node(node) => unreachable!("serialized lines hold no unresolved node {node}"),
            }
        }
    }
}
