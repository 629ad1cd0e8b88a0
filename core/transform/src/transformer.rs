use std::sync::Arc;

use serpent_ast::arena::SourceTree;
use serpent_target::tree::{Arg, Emit};
use tracing::debug;

use crate::{
    errors::TransformError, lowering::Lowering, options::TransformOptions, program::Program,
    registry::RuleRegistry,
};

/// Factory of the node that wraps the lowered top-level statements.
///
/// The node receives a single argument: the list of statement nodes.
pub type ProgramEmitter = fn() -> Box<dyn Emit>;

/// Lowers whole input trees with a shared, read-only rule registry.
#[derive(Clone, Debug)]
pub struct Transformer {
    registry: Arc<RuleRegistry>,
    program: ProgramEmitter,
    options: TransformOptions,
}

impl Transformer {
    #[must_use]
    pub fn new(registry: Arc<RuleRegistry>, program: ProgramEmitter) -> Self {
        Self {
            registry,
            program,
            options: TransformOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Lowers every top-level statement of `source` and wraps them in the
    /// program node.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Unsupported`] for the first node no rule
    /// accepts. Nothing is returned for a failed compile.
    pub fn transform_tree(&self, source: &SourceTree) -> Result<Program, TransformError> {
        let mut lowering = Lowering::new(&self.registry, source, &self.options);
        let body = source
            .statements()
            .map(|statement| lowering.lower(Arg::Input(statement.id)))
            .collect::<Result<Vec<_>, _>>()?;
        let root = lowering.node((self.program)(), vec![Arg::List(body)]);
        lowering.finalize(root, None)?;
        let program = lowering.finish(root);
        debug!(
            statements = source.statements().count(),
            nodes = program.tree().len(),
            "transformed source tree"
        );
        Ok(program)
    }

    /// Parses `code` and transforms it.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Parse`] if the code does not parse, otherwise
    /// see [`transform_tree`](Self::transform_tree).
    pub fn transform_code(&self, code: &str) -> Result<Program, TransformError> {
        let source = serpent_ast::parse(code)?;
        self.transform_tree(&source)
    }
}
