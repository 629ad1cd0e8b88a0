use indexmap::IndexMap;
use sha1::{Digest, Sha1};

/// A source file referenced by mapping entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceInfo {
    /// Logical module name, e.g. `pkg.util`.
    pub module: String,
    pub path: String,
    pub code: String,
}

impl SourceInfo {
    pub fn new(module: impl Into<String>, path: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            path: path.into(),
            code: code.into(),
        }
    }

    /// Hex SHA-1 digest of the full source text.
    #[must_use]
    pub fn sha1(&self) -> String {
        hex::encode(Sha1::digest(self.code.as_bytes()))
    }

    /// Final segment of the path.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Source files by file key, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct SourceCatalog {
    files: IndexMap<String, SourceInfo>,
}

impl SourceCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `info` under `key`, replacing any previous file with that key.
    pub fn insert(&mut self, key: impl Into<String>, info: SourceInfo) -> Option<SourceInfo> {
        self.files.insert(key.into(), info)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SourceInfo> {
        self.files.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceInfo)> {
        self.files.iter().map(|(key, info)| (key.as_str(), info))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
