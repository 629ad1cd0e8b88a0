use serpent_target::{
    line::Line,
    serializer::Serializer,
    tree::{TargetId, TargetTree},
};

/// Output of a successful transform.
#[derive(Debug)]
pub struct Program {
    tree: TargetTree,
    root: TargetId,
    snippets: Vec<String>,
}

impl Program {
    pub(crate) fn new(tree: TargetTree, root: TargetId, snippets: Vec<String>) -> Self {
        Self {
            tree,
            root,
            snippets,
        }
    }

    #[must_use]
    pub fn tree(&self) -> &TargetTree {
        &self.tree
    }

    #[must_use]
    pub fn root(&self) -> TargetId {
        self.root
    }

    /// Helper snippets registered by rules, in registration order.
    #[must_use]
    pub fn snippets(&self) -> &[String] {
        &self.snippets
    }

    #[must_use]
    pub fn serialize(&self) -> Serializer<'_> {
        self.tree.serialize(self.root)
    }

    #[must_use]
    pub fn lines(&self) -> Vec<Line> {
        self.serialize().collect()
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.tree.render(self.root)
    }
}
