use crate::utils::parse;
use serpent_ast::{
    errors::AstError,
    nodes::{Location, NodeKind},
};

#[test]
fn test_parse_top_level_statements() {
    let tree = parse("x = 1\nprint(x)\n");
    let kinds: Vec<NodeKind> = tree.statements().map(|statement| statement.kind).collect();
    assert_eq!(kinds, [NodeKind::ExpressionStatement, NodeKind::ExpressionStatement]);
}

#[test]
fn test_root_is_module_without_location() {
    let tree = parse("pass\n");
    let root = tree.root();
    assert_eq!(root.kind, NodeKind::Module);
    assert_eq!(root.id.index(), 0);
    assert!(root.location.is_none());
    assert_eq!(tree.code(), "pass\n");
}

#[test]
fn test_print_with_parentheses_is_a_call() {
    let tree = parse("print(\"a\")\n");
    let statement = tree.statements().next().unwrap();
    let call = &tree[statement.unnamed_children().next().unwrap()];
    assert_eq!(call.kind, NodeKind::Call);
    assert_eq!(call.text, "print(\"a\")");
    assert_eq!(tree[call.field("function").unwrap()].text, "print");
}

#[test]
fn test_operator_tokens_are_kept_as_fields() {
    let tree = parse("a + b\n");
    let binary = tree.nodes_of_kind(NodeKind::BinaryOperator)[0];
    let operator = &tree[binary.field("operator").unwrap()];
    assert_eq!(operator.kind, NodeKind::Token);
    assert_eq!(operator.text, "+");
    assert_eq!(tree[binary.field("left").unwrap()].text, "a");
    assert_eq!(tree[binary.field("right").unwrap()].text, "b");
    assert_eq!(binary.child_count(), 3);
}

#[test]
fn test_punctuation_is_dropped() {
    let tree = parse("f(a, b)\n");
    let arguments = tree.nodes_of_kind(NodeKind::ArgumentList)[0];
    let texts: Vec<&str> = tree
        .children_of(arguments)
        .map(|argument| argument.text.as_str())
        .collect();
    assert_eq!(texts, ["a", "b"]);
}

#[test]
fn test_comparison_operators_field() {
    let tree = parse("a is not b\n");
    let comparison = tree.nodes_of_kind(NodeKind::ComparisonOperator)[0];
    let operators: Vec<String> = comparison
        .fields("operators")
        .map(|id| tree[id].text.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    assert_eq!(operators, ["is not"]);
    assert_eq!(comparison.unnamed_children().count(), 2);
}

#[test]
fn test_nested_location() {
    let tree = parse("x = 1\n\nif x:\n    y = 2\n");
    let assignments = tree.nodes_of_kind(NodeKind::Assignment);
    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[1].location, Some(Location::new(17, 22, 4, 4)));
    assert_eq!(assignments[1].location.unwrap().to_string(), "4:4");
}

#[test]
fn test_comments_are_skipped() {
    let tree = parse("# leading\nx = 1  # trailing\n");
    assert!(tree.nodes_of_kind(NodeKind::Comment).is_empty());
    assert_eq!(tree.statements().count(), 1);
}

#[test]
fn test_ids_are_pre_order() {
    let tree = parse("if a:\n    b\n");
    for index in 0..tree.len() {
        let node = tree.filter_nodes(|node| node.id.index() == index)[0];
        for child in node.children() {
            assert!(child > node.id, "{child} should come after {}", node.id);
        }
    }
}

#[test]
fn test_syntax_errors_are_collected() {
    let result = serpent_ast::parse("def f(:\n    pass\n");
    let Err(err) = result else {
        panic!("expected a syntax error");
    };
    assert!(matches!(&err, AstError::Syntax { errors } if !errors.is_empty()));
    assert!(err.to_string().starts_with("syntax errors in source:\n"));
}

#[test]
fn test_empty_source() {
    let tree = parse("");
    assert_eq!(tree.statements().count(), 0);
    assert_eq!(tree.len(), 1);
}
