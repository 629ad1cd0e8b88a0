use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceMapError {
    /// A mapping entry refers to a file key missing from the catalog.
    #[error("no source registered for file key `{0}`")]
    UnknownSource(String),

    #[error("failed to serialize line map: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode source map: {0}")]
    Encode(#[from] sourcemap::Error),

    #[error("encoded source map is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
