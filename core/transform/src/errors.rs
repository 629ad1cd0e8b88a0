use serpent_ast::{
    errors::AstError,
    nodes::{InputNode, Location, NodeKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum TransformError {
    /// No registered rule accepted the node.
    #[error("no transformation for `{kind}` node{} `{text}`", at(.location))]
    Unsupported {
        kind: NodeKind,
        text: String,
        location: Option<Location>,
    },

    #[error(transparent)]
    Parse(#[from] AstError),
}

impl TransformError {
    pub fn unsupported(node: &InputNode) -> Self {
        TransformError::Unsupported {
            kind: node.kind,
            text: node.text.clone(),
            location: node.location,
        }
    }
}

fn at(location: &Option<Location>) -> String {
    location.map_or_else(String::new, |location| format!(" at {location}"))
}
