#![warn(clippy::pedantic)]
//! Core orchestration crate of the Serpent compiler.
//!
//! Serpent translates Python source into JavaScript and records where every
//! generated character came from, so that errors raised by the generated code
//! can be reported against the original source.
//!
//! ```text
//! .py source → tree-sitter → SourceTree → Transformer → Program ─┬─▶ JavaScript
//!                                                               └─▶ line map ─▶ source map
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serpent::{CompileOptions, SourceUnit, compile};
//!
//! let unit = SourceUnit::new("app", "src/app.py", "print('hello')\n");
//! let compiled = compile(&unit, &CompileOptions::default())?;
//! assert_eq!(compiled.code, "console.log('hello');\n");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Several modules
//!
//! [`compile_project`] orders units by their `import` statements so that a
//! module always comes after the modules it imports, then compiles them in
//! that order with mapping ids that stay unique across the whole project.
//!
//! ```rust,no_run
//! use serpent::{CompileOptions, SourceUnit, compile_project};
//!
//! let units = vec![
//!     SourceUnit::new("app", "app.py", "import util\nprint(1)\n"),
//!     SourceUnit::new("util", "util.py", "x = 1\n"),
//! ];
//! let compiled = compile_project(&units, &CompileOptions::default())?;
//! assert_eq!(compiled[0].module, "util");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All public functions return `anyhow::Result`. Parse failures list every
//! syntax error at once; lowering stops at the first construct no rule
//! accepts. A failed compile produces neither code nor maps.

mod project;

use anyhow::Context;
use serde::Deserialize;
use serpent_ast::arena::SourceTree;
use serpent_sourcemap::{
    catalog::{SourceCatalog, SourceInfo},
    document::SourceMapDocument,
    export::export_line_maps,
    linemap::{LineMapBuilder, LineMapping},
};
use serpent_transform::{options::TransformOptions, program::Program};
use tracing::info;

pub use project::{compile_project, imports_of};

/// Parses Python source into a [`SourceTree`].
///
/// # Errors
///
/// Returns an error listing every syntax error if the source does not parse.
pub fn parse(source_code: &str) -> anyhow::Result<SourceTree> {
    Ok(serpent_ast::parse(source_code)?)
}

/// Lowers Python source with the built-in rules.
///
/// # Errors
///
/// Returns an error if the source does not parse or contains a construct no
/// rule accepts.
pub fn transform(source_code: &str, options: &TransformOptions) -> anyhow::Result<Program> {
    let transformer = serpent_rules::default_transformer().with_options(options.clone());
    Ok(transformer.transform_code(source_code)?)
}

/// Settings of one compile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub transform: TransformOptions,
    /// First mapping id handed out by the line map.
    pub first_mapping_id: u32,
}

/// A Python module to compile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceUnit {
    /// Dotted module name. Also used as the file key of mapping entries.
    pub module: String,
    pub path: String,
    pub code: String,
}

impl SourceUnit {
    pub fn new(module: impl Into<String>, path: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            path: path.into(),
            code: code.into(),
        }
    }

    fn info(&self) -> SourceInfo {
        SourceInfo::new(&self.module, &self.path, &self.code)
    }
}

/// Generated JavaScript together with its maps.
#[derive(Clone, Debug)]
pub struct CompiledUnit {
    pub module: String,
    pub path: String,
    /// Generated code, without helper snippets.
    pub code: String,
    /// Helper snippets the code relies on.
    pub snippets: Vec<String>,
    pub line_map: LineMapping,
    /// Version 3 source map of `code`.
    pub source_map: String,
    source: SourceInfo,
}

impl CompiledUnit {
    /// Line map of this unit in the line-map text format.
    ///
    /// # Errors
    ///
    /// Returns an error if the line map cannot be serialized.
    pub fn export_line_maps(&self) -> anyhow::Result<String> {
        let mut catalog = SourceCatalog::new();
        catalog.insert(&self.module, self.source.clone());
        Ok(export_line_maps(&self.line_map, &catalog)?)
    }

    #[must_use]
    pub fn source(&self) -> &SourceInfo {
        &self.source
    }
}

/// Compiles one unit to JavaScript, its line map and its source map.
///
/// # Errors
///
/// Returns an error if the unit does not parse, contains an unsupported
/// construct, or its source map cannot be encoded.
pub fn compile(unit: &SourceUnit, options: &CompileOptions) -> anyhow::Result<CompiledUnit> {
    let program = transform(&unit.code, &options.transform)
        .with_context(|| format!("failed to compile module `{}`", unit.module))?;
    let line_map = LineMapBuilder::new(program.tree(), &unit.module)
        .with_first_id(options.first_mapping_id)
        .build(program.root());

    let source = unit.info();
    let mut catalog = SourceCatalog::new();
    catalog.insert(&unit.module, source.clone());
    let source_map = SourceMapDocument::from_line_map(&line_map, &catalog)?
        .with_file(js_path(&unit.path))
        .encode()
        .with_context(|| format!("failed to encode source map of `{}`", unit.module))?;

    info!(
        module = %unit.module,
        lines = line_map.rows.len(),
        mappings = line_map.entries.len(),
        "compiled module"
    );
    Ok(CompiledUnit {
        module: unit.module.clone(),
        path: unit.path.clone(),
        code: line_map.code.clone(),
        snippets: program.snippets().to_vec(),
        line_map,
        source_map,
        source,
    })
}

fn js_path(path: &str) -> String {
    match path.strip_suffix(".py") {
        Some(stem) => format!("{stem}.js"),
        None => format!("{path}.js"),
    }
}
