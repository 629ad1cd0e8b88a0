//! Position tokens in the style of the standard source map format.
//!
//! Two ways of producing them are provided:
//!
//! - [`tokens_from_line_map`] derives one token per run of equally attributed
//!   characters from a [`LineMapping`]. This is what
//!   [`SourceMapDocument::from_line_map`] uses.
//! - [`tokens_from_lines`] walks serialized lines on its own and places every
//!   child fragment by searching its rendered text inside the parent's. When
//!   two siblings render the same text the search finds the first one, so the
//!   second sibling's tokens land on the wrong column.
//!
//! [`SourceMapDocument::from_line_map`]: crate::document::SourceMapDocument::from_line_map

use serpent_ast::nodes::Location;
use serpent_target::{
    line::{Fragment, Line, Part},
    tree::TargetTree,
};

use crate::linemap::LineMapping;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub dst_line: u32,
    pub dst_col: u32,
    /// Key of the source file in the catalog.
    pub source: String,
    /// 0-based input line.
    pub src_line: u32,
    pub src_col: u32,
}

/// One token per run of characters attributed to the same entry.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn tokens_from_line_map(mapping: &LineMapping) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (dst_line, row) in mapping.rows.iter().enumerate() {
        let mut previous = None;
        for (dst_col, slot) in row.iter().enumerate() {
            if *slot == previous {
                continue;
            }
            previous = *slot;
            let Some(entry) = slot.and_then(|id| mapping.entry(id)) else {
                continue;
            };
            tokens.push(Token {
                dst_line: dst_line as u32,
                dst_col: dst_col as u32,
                source: entry.file.clone(),
                src_line: entry.line,
                src_col: entry.column,
            });
        }
    }
    tokens
}

/// Tokens of serialized `lines`, numbered in order from zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn tokens_from_lines(tree: &TargetTree, lines: &[Line], source: &str) -> Vec<Token> {
    lines
        .iter()
        .enumerate()
        .flat_map(|(dst_line, line)| line_tokens(tree, line, dst_line as u32, source))
        .collect()
}

/// Tokens of a single serialized line.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn line_tokens(tree: &TargetTree, line: &Line, dst_line: u32, source: &str) -> Vec<Token> {
    let offset = line.content_offset();
    fragment_runs(tree, &line.content)
        .into_iter()
        .map(|run| Token {
            dst_line,
            dst_col: (run.dst_offset + offset) as u32,
            source: source.to_string(),
            src_line: run.location.line.saturating_sub(1),
            src_col: run.location.column,
        })
        .collect()
}

struct Run {
    location: Location,
    dst_offset: usize,
}

fn fragment_runs(tree: &TargetTree, fragment: &Fragment) -> Vec<Run> {
    let location = fragment
        .origin
        .and_then(|origin| tree.get(origin))
        .and_then(serpent_target::tree::TargetNode::location);
    let rendered = fragment.to_string();
    let mut runs = Vec::new();
    let mut pending = false;
    let mut column = 0;
    for part in &fragment.parts {
        match part {
            Part::Text(text) => pending |= !text.is_empty(),
            Part::Fragment(child) => {
                if let (true, Some(location)) = (pending, location) {
                    runs.push(Run {
                        location,
                        dst_offset: column,
                    });
                }
                pending = false;
                let child_text = child.to_string();
                let found = char_offset(&rendered, &child_text);
                column = found + child_text.chars().count();
                runs.extend(fragment_runs(tree, child).into_iter().map(|run| Run {
                    dst_offset: run.dst_offset + found,
                    ..run
                }));
            }
            Part::Node(node) => unreachable!("serialized lines hold no unresolved node {node}"),
        }
    }
    if let (true, Some(location)) = (pending, location) {
        runs.push(Run {
            location,
            dst_offset: column,
        });
    }
    runs
}

/// Character offset of the first occurrence of `needle` in `haystack`.
fn char_offset(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .map_or(0, |byte| haystack[..byte].chars().count())
}
