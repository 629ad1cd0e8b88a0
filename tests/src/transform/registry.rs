use serpent_ast::nodes::NodeKind;
use serpent_rules::{default_registry, python};
use serpent_transform::registry::RuleRegistry;

#[test]
fn test_modules_are_recorded() {
    let registry = default_registry();
    assert_eq!(registry.modules(), ["python"]);
    assert!(format!("{registry:?}").contains("python"));
}

#[test]
fn test_rules_keep_registration_order() {
    let registry = default_registry();
    let rules = registry.rules_for(NodeKind::Call);
    assert_eq!(rules.len(), 2);
    assert!(registry.handles(NodeKind::Identifier));
    assert!(!registry.handles(NodeKind::Lambda));
    assert!(registry.rules_for(NodeKind::Lambda).is_empty());
}

#[test]
fn test_register_chains() {
    let mut registry = RuleRegistry::new();
    assert!(registry.is_empty());
    registry
        .register(NodeKind::Identifier, python::identifier)
        .register(NodeKind::Identifier, python::identifier)
        .register(NodeKind::Integer, python::number);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.rules_for(NodeKind::Identifier).len(), 2);
    assert!(registry.modules().is_empty());
}
