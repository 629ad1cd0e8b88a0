use serpent_rules::js::Name;
use serpent_target::{
    fragment,
    line::{Fragment, INDENT, Item, Line},
    tree::{Arg, TargetTree},
};

#[test]
fn test_line_indent_helpers() {
    let line = Line::new("x").indent(2).indented_by(1).delimited();
    assert_eq!(line.indent, 3);
    assert_eq!(line.content_offset(), 3 * INDENT.len());
    assert_eq!(line.to_string(), "            x;\n");
}

#[test]
fn test_indent_replaces_previous_level() {
    let line = Line::new("x").indented_by(4).indent(1);
    assert_eq!(line.to_string(), "    x\n");
}

#[test]
fn test_fragment_join() {
    let fragment = Fragment::join(", ", ["a", "b", "c"]);
    assert_eq!(fragment.to_string(), "a, b, c");
    assert!(Fragment::join(", ", Vec::<&str>::new()).is_empty());
}

#[test]
fn test_fragment_macro() {
    let call = fragment!["f", "(", String::from("x"), ")"];
    assert_eq!(call.to_string(), "f(x)");
    assert_eq!(call.parts.len(), 4);
    assert!(fragment![].is_empty());
}

#[test]
fn test_argument_parts() {
    let list = Arg::List(vec![Arg::Int(1), Arg::Bool(true), Arg::None, "s".into()]);
    assert_eq!(Fragment::from(&list).to_string(), "1, true, null, s");
}

#[test]
fn test_block_flattens_lists() {
    let mut tree = TargetTree::new();
    let first = tree.push(Box::new(Name), Vec::new());
    let second = tree.push(Box::new(Name), Vec::new());
    let arg = Arg::List(vec![first.into(), Arg::List(vec![second.into()])]);
    assert_eq!(
        Item::block(&arg, 1),
        [Item::nested(first, 1), Item::nested(second, 1)]
    );
    assert!(Item::block(&Arg::None, 1).is_empty());
}

#[test]
#[should_panic(expected = "expected lowered statements")]
fn test_block_rejects_text() {
    let _ = Item::block(&Arg::Text("x".into()), 0);
}
