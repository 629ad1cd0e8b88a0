#![warn(clippy::pedantic)]
//! Python to JavaScript rules for the Serpent transformation engine.
//!
//! [`js`] holds the output node types, [`python`] the rules that build them.
//! The catalog covers expressions, assignments, control flow and plain
//! functions; everything else is reported as unsupported by the engine.

use std::sync::Arc;

use serpent_target::tree::Emit;
use serpent_transform::{registry::RuleRegistry, transformer::Transformer};

pub mod js;
pub mod python;

/// Program node wrapping the lowered top-level statements.
#[must_use]
pub fn program() -> Box<dyn Emit> {
    Box::new(js::Statements)
}

/// Registry holding the [`python::PythonRules`] module.
#[must_use]
pub fn default_registry() -> RuleRegistry {
    RuleRegistry::from_modules(&[&python::PythonRules])
}

/// Transformer over [`default_registry`] emitting [`js::Statements`] programs.
#[must_use]
pub fn default_transformer() -> Transformer {
    Transformer::new(Arc::new(default_registry()), program)
}
