use core::fmt;

use rustc_hash::FxHashMap;
use serpent_ast::nodes::{InputNode, NodeKind};
use serpent_target::tree::TargetId;
use tracing::debug;

use crate::lowering::Lowering;

/// A transformation rule.
///
/// Returns `None` to decline, in which case the next rule registered for the
/// same kind is tried.
pub type Rule = for<'a> fn(&mut Lowering<'a>, &'a InputNode) -> Option<TargetId>;

/// A pluggable set of rules.
pub trait RuleModule {
    fn name(&self) -> &'static str;

    fn register(&self, registry: &mut RuleRegistry);
}

/// Rules per input node kind, in registration order.
#[derive(Default)]
pub struct RuleRegistry {
    rules: FxHashMap<NodeKind, Vec<Rule>>,
    modules: Vec<&'static str>,
}

impl RuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from `modules`, registering them in the given order.
    #[must_use]
    pub fn from_modules(modules: &[&dyn RuleModule]) -> Self {
        let mut registry = Self::new();
        for module in modules {
            module.register(&mut registry);
            registry.modules.push(module.name());
            debug!(module = module.name(), kinds = registry.len(), "registered rule module");
        }
        registry
    }

    /// Appends `rule` to the candidates for `kind`.
    pub fn register(&mut self, kind: NodeKind, rule: Rule) -> &mut Self {
        self.rules.entry(kind).or_default().push(rule);
        self
    }

    #[must_use]
    pub fn rules_for(&self, kind: NodeKind) -> &[Rule] {
        self.rules.get(&kind).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn handles(&self, kind: NodeKind) -> bool {
        !self.rules_for(kind).is_empty()
    }

    #[must_use]
    pub fn modules(&self) -> &[&'static str] {
        &self.modules
    }

    /// Number of node kinds with at least one rule.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self
            .rules
            .iter()
            .map(|(kind, rules)| (kind.grammar_name(), rules.len()))
            .collect();
        kinds.sort_unstable();
        f.debug_struct("RuleRegistry")
            .field("modules", &self.modules)
            .field("rules", &kinds)
            .finish()
    }
}
