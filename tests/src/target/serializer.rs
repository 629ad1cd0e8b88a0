use std::{cell::Cell, rc::Rc};

use crate::utils::finalized;
use pretty_assertions::assert_eq;
use serpent_rules::js::{
    Call, ExpressionStatement, Function, Keyword, Literal, Name, Return, Statements, While,
};
use serpent_target::{
    line::Emission,
    tree::{Arg, Emit, TargetId, TargetTree},
};

#[derive(Debug)]
struct Counting {
    calls: Rc<Cell<usize>>,
}

impl Emit for Counting {
    fn emit(&self, _args: &[Arg]) -> Emission {
        self.calls.set(self.calls.get() + 1);
        Emission::inline("tick")
    }
}

struct Loop {
    tree: TargetTree,
    root: TargetId,
    function: TargetId,
    ret: TargetId,
    param: TargetId,
}

fn while_with_function() -> Loop {
    let mut tree = TargetTree::new();
    let param = finalized(&mut tree, Name, vec!["x".into()]);
    let ret = finalized(&mut tree, Return, vec![param.into()]);
    let function = finalized(
        &mut tree,
        Function,
        vec!["f".into(), vec!["x"].into(), vec![ret].into()],
    );
    let condition = finalized(&mut tree, Literal, vec!["true".into()]);
    let stop = finalized(&mut tree, Keyword, vec!["break".into()]);
    let body = finalized(
        &mut tree,
        While,
        vec![condition.into(), vec![function, stop].into()],
    );
    let root = finalized(&mut tree, Statements, vec![vec![body].into()]);
    Loop {
        tree,
        root,
        function,
        ret,
        param,
    }
}

#[test]
fn test_render_nested_blocks() {
    let program = while_with_function();
    assert_eq!(
        program.tree.render(program.root),
        "while (true) {\n    function f(x) {\n        return x;\n    }\n    break;\n}\n"
    );
}

#[test]
fn test_line_indents() {
    let program = while_with_function();
    let indents: Vec<u32> = program
        .tree
        .serialize(program.root)
        .map(|line| line.indent)
        .collect();
    assert_eq!(indents, [0, 1, 2, 1, 1, 0]);
}

#[test]
fn test_parents_are_recorded() {
    let program = while_with_function();
    let mut serializer = program.tree.serialize(program.root);
    let lines: Vec<_> = serializer.by_ref().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(serializer.parent_of(program.ret), Some(program.function));
    assert_eq!(serializer.parent_of(program.param), Some(program.ret));
    assert_eq!(serializer.parent_of(program.root), None);
}

#[test]
fn test_visited_nodes_are_drained_per_line() {
    let program = while_with_function();
    let mut serializer = program.tree.serialize(program.root);
    let first = serializer.next().unwrap();
    assert_eq!(first.to_string(), "while (true) {\n");
    let visited: Vec<TargetId> = serializer.drain_visited().collect();
    assert_eq!(visited.first(), Some(&program.root));
    assert!(!visited.contains(&program.function));

    serializer.next().unwrap();
    let visited: Vec<TargetId> = serializer.drain_visited().collect();
    assert_eq!(visited, [program.function]);
}

#[test]
fn test_emission_is_lazy() {
    let calls = Rc::new(Cell::new(0));
    let mut tree = TargetTree::new();
    let root = finalized(
        &mut tree,
        Counting {
            calls: Rc::clone(&calls),
        },
        Vec::new(),
    );

    let mut serializer = tree.serialize(root);
    assert_eq!(calls.get(), 0);
    assert_eq!(serializer.next().unwrap().to_string(), "tick\n");
    assert_eq!(calls.get(), 1);
    assert!(serializer.next().is_none());

    assert_eq!(tree.render(root), "tick\n");
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_inline_root_becomes_a_line() {
    let mut tree = TargetTree::new();
    let callee = finalized(&mut tree, Name, vec!["f".into()]);
    let call = finalized(&mut tree, Call, vec![callee.into(), Arg::List(Vec::new())]);
    let line = tree.serialize(call).next().unwrap();
    assert_eq!(line.origin, Some(call));
    assert_eq!(line.to_string(), "f()\n");
}

#[test]
#[should_panic(expected = "emitted before finalization")]
fn test_unfinalized_node_panics() {
    let mut tree = TargetTree::new();
    let name = tree.push(Box::new(Name), vec!["x".into()]);
    let _ = tree.render(name);
}

#[test]
#[should_panic(expected = "cannot be inlined")]
fn test_inlining_statement_panics() {
    let mut tree = TargetTree::new();
    let stop = finalized(&mut tree, Keyword, vec!["break".into()]);
    let statement = finalized(&mut tree, ExpressionStatement, vec![stop.into()]);
    let _ = tree.render(statement);
}

#[test]
#[should_panic(expected = "assigned twice")]
fn test_finalizing_twice_panics() {
    let mut tree = TargetTree::new();
    let name = finalized(&mut tree, Name, vec!["x".into()]);
    tree.set_transformed(name, vec!["y".into()]);
}
