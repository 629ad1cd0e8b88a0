use serde::Deserialize;

/// Tunables of the transformation engine.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Length of identifiers produced by `Lowering::new_name`.
    pub fresh_name_length: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            fresh_name_length: 20,
        }
    }
}
