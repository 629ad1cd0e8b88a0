use indexmap::IndexSet;
use serpent_target::{line::Line, tree::TargetTree};
use sourcemap::SourceMapBuilder;
use tracing::debug;

use crate::{
    catalog::{SourceCatalog, SourceInfo},
    errors::SourceMapError,
    linemap::LineMapping,
    tokens::{Token, tokens_from_line_map, tokens_from_lines},
};

/// Source file referenced by a [`SourceMapDocument`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub key: String,
    pub module: String,
    pub path: String,
    pub sha1: String,
    pub contents: String,
}

impl SourceFile {
    fn from_info(key: &str, info: &SourceInfo) -> Self {
        Self {
            key: key.to_string(),
            module: info.module.clone(),
            path: info.path.clone(),
            sha1: info.sha1(),
            contents: info.code.clone(),
        }
    }
}

/// Tokens plus the sources they point into.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceMapDocument {
    pub file: Option<String>,
    pub tokens: Vec<Token>,
    pub sources: Vec<SourceFile>,
}

impl SourceMapDocument {
    /// Derives the document from a per-character line map.
    ///
    /// # Errors
    ///
    /// Returns [`SourceMapError::UnknownSource`] if a token refers to a file
    /// key missing from `catalog`.
    pub fn from_line_map(
        mapping: &LineMapping,
        catalog: &SourceCatalog,
    ) -> Result<Self, SourceMapError> {
        Self::with_tokens(tokens_from_line_map(mapping), catalog)
    }

    /// Builds the document by walking serialized lines.
    ///
    /// # Errors
    ///
    /// Returns [`SourceMapError::UnknownSource`] if `source` is missing from
    /// `catalog`.
    pub fn from_lines(
        tree: &TargetTree,
        lines: &[Line],
        source: &str,
        catalog: &SourceCatalog,
    ) -> Result<Self, SourceMapError> {
        Self::with_tokens(tokens_from_lines(tree, lines, source), catalog)
    }

    fn with_tokens(tokens: Vec<Token>, catalog: &SourceCatalog) -> Result<Self, SourceMapError> {
        let keys: IndexSet<&str> = tokens.iter().map(|token| token.source.as_str()).collect();
        let sources = keys
            .into_iter()
            .map(|key| {
                catalog
                    .get(key)
                    .map(|info| SourceFile::from_info(key, info))
                    .ok_or_else(|| SourceMapError::UnknownSource(key.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            file: None,
            tokens,
            sources,
        })
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Encodes the document as a version 3 source map.
    ///
    /// # Errors
    ///
    /// Returns an error if a token refers to an unknown source or the encoder
    /// fails.
    pub fn encode(&self) -> Result<String, SourceMapError> {
        let mut builder = SourceMapBuilder::new(self.file.as_deref());
        for source in &self.sources {
            let id = builder.add_source(source.path.as_str().into());
            builder.set_source_contents(id, Some(source.contents.as_str().into()));
        }
        for token in &self.tokens {
            let source = self
                .sources
                .iter()
                .find(|source| source.key == token.source)
                .ok_or_else(|| SourceMapError::UnknownSource(token.source.clone()))?;
            builder.add(
                token.dst_line,
                token.dst_col,
                token.src_line,
                token.src_col,
                Some(source.path.as_str()),
                None,
                false,
            );
        }
        let map = builder.into_sourcemap();
        let mut buffer = Vec::new();
        map.to_writer(&mut buffer)?;
        debug!(tokens = self.tokens.len(), bytes = buffer.len(), "encoded source map");
        Ok(String::from_utf8(buffer)?)
    }
}
