#![warn(clippy::pedantic)]
//! Position tracking for Serpent output.
//!
//! The canonical representation is the per-character [`LineMapping`] built by
//! [`LineMapBuilder`]. It can be exported in the line-map text format with
//! [`export_line_maps`], or turned into a standard version 3 source map through
//! [`SourceMapDocument::from_line_map`].
//!
//! [`LineMapping`]: linemap::LineMapping
//! [`LineMapBuilder`]: linemap::LineMapBuilder
//! [`export_line_maps`]: export::export_line_maps
//! [`SourceMapDocument::from_line_map`]: document::SourceMapDocument::from_line_map

pub mod catalog;
pub mod document;
pub mod errors;
pub mod export;
pub mod linemap;
pub mod tokens;
