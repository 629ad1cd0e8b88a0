use std::sync::Arc;

use crate::utils::{init_tracing, line_map, slots, transform};
use pretty_assertions::assert_eq;
use serpent_ast::nodes::{InputNode, NodeKind};
use serpent_rules::{
    js::{Assign, ExpressionStatement, Literal, Name},
    program,
    python::PythonRules,
};
use serpent_sourcemap::linemap::{LineMapBuilder, MappingEntry};
use serpent_target::tree::TargetId;
use serpent_transform::{
    lowering::Lowering,
    registry::{RuleModule, RuleRegistry},
    transformer::Transformer,
};

/// Replaces a bare name statement with a fresh declaration.
struct Declarations;

fn declare_fresh(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let expression = cx.input(node.unnamed_children().next()?);
    if !expression.is(NodeKind::Identifier) {
        return None;
    }
    let name = cx.new_name();
    let target = cx.node(Name, vec![name.into()]);
    let zero = cx.node(Literal, vec!["0".into()]);
    let assign = cx.node(Assign, vec![target.into(), zero.into(), true.into()]);
    Some(cx.node(ExpressionStatement, vec![assign.into()]))
}

impl RuleModule for Declarations {
    fn name(&self) -> &'static str {
        "declarations"
    }

    fn register(&self, registry: &mut RuleRegistry) {
        registry.register(NodeKind::ExpressionStatement, declare_fresh);
    }
}

fn entry(id: u32, line: u32, column: u32) -> MappingEntry {
    MappingEntry {
        id,
        file: "app".to_string(),
        line,
        column,
    }
}

#[test]
fn test_characters_map_to_nearest_located_node() {
    init_tracing();
    let registry = RuleRegistry::from_modules(&[&Declarations, &PythonRules]);
    let program = Transformer::new(Arc::new(registry), program)
        .transform_code("print(\"a\")\nx\n")
        .unwrap();
    let mapping = line_map(&program, "app");

    assert_eq!(mapping.rows.len(), 2);
    assert_eq!(
        mapping.rows[0],
        slots(&[(Some(1), 12), (Some(2), 3), (Some(1), 1), (Some(0), 2)])
    );
    assert_eq!(mapping.rows[0].len(), 18);
    assert_eq!(mapping.rows[1], slots(&[(Some(3), 30)]));
    assert_eq!(
        mapping.entries,
        [entry(0, 0, 0), entry(1, 0, 0), entry(2, 0, 6), entry(3, 1, 0)]
    );
    assert!(mapping.code.starts_with("console.log(\"a\");\nvar "));
    assert!(mapping.code.ends_with(" = 0;\n"));
}

#[test]
fn test_entry_lines_are_zero_based() {
    let program = transform("\n\nprint(1)\n");
    let mapping = line_map(&program, "app");
    assert_eq!(mapping.entries[0], entry(0, 2, 0));
    assert_eq!(mapping.rows.len(), 1);
}

#[test]
fn test_code_matches_render() {
    let source = "def f(a):\n    if a:\n        return a // 2\n    return 0\n";
    let program = transform(source);
    let mapping = line_map(&program, "app");
    assert_eq!(mapping.code, program.render());
    for (row, line) in mapping.rows.iter().zip(mapping.code.lines()) {
        assert_eq!(row.len(), line.chars().count() + 1);
    }
}

#[test]
fn test_rows_count_characters() {
    let program = transform("print('é')\n");
    let mapping = line_map(&program, "app");
    assert_eq!(mapping.code, "console.log('é');\n");
    assert_eq!(mapping.rows[0].len(), 18);
    assert_eq!(mapping.rows[0][13], Some(2));
    assert_eq!(mapping.rows[0][15], Some(1));
}

#[test]
fn test_indent_belongs_to_line() {
    let program = transform("while a:\n    b = 1\n");
    let mapping = line_map(&program, "app");
    let row = &mapping.rows[1];
    let statement = mapping.lookup(1, 0).unwrap();
    assert_eq!((statement.line, statement.column), (1, 4));
    assert_eq!(row[0], row[row.len() - 1]);
    assert_ne!(row[0], row[4]);
}

#[test]
fn test_ids_start_at_first_id() {
    let program = transform("print(1)\n");
    let mapping = LineMapBuilder::new(program.tree(), "app")
        .with_first_id(10)
        .build(program.root());
    let ids: Vec<u32> = mapping.entries.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, [10, 11, 12]);
    assert_eq!(mapping.next_id(), 13);
    assert!(mapping.entry(0).is_none());
    assert_eq!(mapping.lookup(0, 12).map(|entry| entry.column), Some(6));
    assert!(mapping.lookup(5, 0).is_none());
}

#[test]
fn test_continued_string_splits_rows() {
    let program = transform("x = 'a\\\nb'\nprint(x)\n");
    let mapping = line_map(&program, "app");
    assert_eq!(mapping.code, "x = 'a\\\nb';\nconsole.log(x);\n");
    assert_eq!(mapping.rows.len(), mapping.code.lines().count());
    for (row, line) in mapping.rows.iter().zip(mapping.code.lines()) {
        assert_eq!(row.len(), line.chars().count() + 1);
    }
    let continued = mapping.lookup(1, 0).unwrap();
    assert_eq!((continued.line, continued.column), (0, 4));
    let statement = mapping.lookup(1, 3).unwrap();
    assert_eq!((statement.line, statement.column), (0, 0));
    let call = mapping.lookup(2, 0).unwrap();
    assert_eq!((call.line, call.column), (2, 0));
}

#[test]
fn test_silent_statement_gets_entry_anywhere() {
    let head = line_map(&transform("import os\nprint(1)\n"), "app");
    let tail = line_map(&transform("print(1)\nimport os\n"), "app");
    assert_eq!(head.code, tail.code);
    assert_eq!(head.entries.len(), tail.entries.len());
    assert_eq!(head.entries[0], entry(0, 0, 0));
    assert_eq!(tail.entries.last(), Some(&entry(3, 1, 0)));
}
