//! Rules lowering Python constructs to the nodes of [`crate::js`].
//!
//! Rules decline (return `None`) on shapes they do not handle, so a more
//! specific rule can be registered ahead of a generic one for the same kind.

use serpent_ast::nodes::{InputId, InputNode, NodeKind};
use serpent_target::tree::{Arg, TargetId};
use serpent_transform::{
    lowering::Lowering,
    registry::{RuleModule, RuleRegistry},
};
use tracing::trace;

use crate::js::{
    Array, Assign, AugAssign, Attribute, BinOp, Call, Empty, ExpressionStatement, ForIndex,
    Function, If, Keyword, Literal, Name, Paren, Return, Subscript, Unary, While,
};

/// Helper backing Python's `//` operator.
pub const FLOORDIV_SNIPPET: &str =
    "function __floordiv(a, b) {\n    return Math.floor(a / b);\n}\n";

pub struct PythonRules;

impl RuleModule for PythonRules {
    fn name(&self) -> &'static str {
        "python"
    }

    fn register(&self, registry: &mut RuleRegistry) {
        registry
            .register(NodeKind::ExpressionStatement, expression_statement)
            .register(NodeKind::Call, print_call)
            .register(NodeKind::Call, call)
            .register(NodeKind::Identifier, identifier)
            .register(NodeKind::String, string)
            .register(NodeKind::Integer, number)
            .register(NodeKind::Float, number)
            .register(NodeKind::True, constant)
            .register(NodeKind::False, constant)
            .register(NodeKind::None, constant)
            .register(NodeKind::Assignment, assignment)
            .register(NodeKind::AugmentedAssignment, augmented_assignment)
            .register(NodeKind::BinaryOperator, binary_operator)
            .register(NodeKind::BooleanOperator, boolean_operator)
            .register(NodeKind::NotOperator, not_operator)
            .register(NodeKind::UnaryOperator, unary_operator)
            .register(NodeKind::ComparisonOperator, comparison_operator)
            .register(NodeKind::ParenthesizedExpression, parenthesized_expression)
            .register(NodeKind::Attribute, attribute)
            .register(NodeKind::Subscript, subscript)
            .register(NodeKind::List, list)
            .register(NodeKind::IfStatement, if_statement)
            .register(NodeKind::WhileStatement, while_statement)
            .register(NodeKind::ForStatement, for_statement)
            .register(NodeKind::FunctionDefinition, function_definition)
            .register(NodeKind::ReturnStatement, return_statement)
            .register(NodeKind::PassStatement, nothing)
            .register(NodeKind::ImportStatement, nothing)
            .register(NodeKind::ImportFromStatement, nothing)
            .register(NodeKind::FutureImportStatement, nothing)
            .register(NodeKind::BreakStatement, keyword)
            .register(NodeKind::ContinueStatement, keyword);
    }
}

fn name_node(cx: &mut Lowering<'_>, name: &str) -> TargetId {
    cx.node(Name, vec![name.into()])
}

fn inputs(ids: impl Iterator<Item = InputId>) -> Arg {
    Arg::List(ids.map(Arg::Input).collect())
}

/// Statements of a block, or nothing.
fn statements(cx: &Lowering<'_>, block: Option<InputId>) -> Arg {
    match block {
        Some(block) => inputs(cx.input(block).children()),
        None => Arg::List(Vec::new()),
    }
}

fn in_function(cx: &Lowering<'_>, node: &InputNode) -> bool {
    cx.find_parent(node, NodeKind::FunctionDefinition).is_some()
}

/// Whether an operand has to be parenthesized after a prefix operator.
fn needs_parens(node: &InputNode) -> bool {
    !matches!(
        node.kind,
        NodeKind::Identifier
            | NodeKind::Call
            | NodeKind::Attribute
            | NodeKind::Subscript
            | NodeKind::Integer
            | NodeKind::Float
            | NodeKind::String
            | NodeKind::True
            | NodeKind::False
            | NodeKind::None
            | NodeKind::List
            | NodeKind::ParenthesizedExpression
    )
}

/// Positional arguments of a call, `None` if there is anything else.
fn positional_arguments(cx: &Lowering<'_>, node: &InputNode) -> Option<Arg> {
    let arguments = cx.input(node.field("arguments")?);
    if !arguments.is(NodeKind::ArgumentList) {
        return None;
    }
    let positional = arguments.children().all(|id| {
        !matches!(
            cx.input(id).kind,
            NodeKind::KeywordArgument | NodeKind::ListSplat | NodeKind::DictionarySplat
        )
    });
    positional.then(|| inputs(arguments.children()))
}

pub fn expression_statement(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    if node.child_count() != 1 {
        return None;
    }
    let expression = node.unnamed_children().next()?;
    Some(cx.node(ExpressionStatement, vec![expression.into()]))
}

/// `print(...)` becomes `console.log(...)`.
pub fn print_call(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let function = cx.input(node.field("function")?);
    if !function.is(NodeKind::Identifier) || function.text != "print" {
        return None;
    }
    let arguments = positional_arguments(cx, node)?;
    let callee = name_node(cx, "console.log");
    Some(cx.node(Call, vec![callee.into(), arguments]))
}

pub fn call(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let function = node.field("function")?;
    let arguments = positional_arguments(cx, node)?;
    Some(cx.node(Call, vec![function.into(), arguments]))
}

pub fn identifier(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    Some(name_node(cx, &node.text))
}

/// Plain single-quoted or double-quoted strings without prefixes.
pub fn string(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let mut parts = node.children().map(|id| cx.input(id));
    let start = parts.find(|part| part.is(NodeKind::StringStart))?;
    if start.text != "\"" && start.text != "'" {
        return None;
    }
    if node
        .children()
        .any(|id| cx.input(id).is(NodeKind::Interpolation))
    {
        return None;
    }
    Some(cx.node(Literal, vec![node.text.as_str().into()]))
}

pub fn number(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    if node.text.ends_with(['j', 'J', 'l', 'L']) {
        return None;
    }
    Some(cx.node(Literal, vec![node.text.replace('_', "").into()]))
}

pub fn constant(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let value = match node.kind {
        NodeKind::True => "true",
        NodeKind::False => "false",
        NodeKind::None => "null",
        _ => return None,
    };
    Some(cx.node(Literal, vec![value.into()]))
}

/// Inside a function body a plain name target is declared with `var`.
pub fn assignment(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let left = cx.input(node.field("left")?);
    let right = cx.input(node.field("right")?);
    if !matches!(
        left.kind,
        NodeKind::Identifier | NodeKind::Attribute | NodeKind::Subscript
    ) {
        return None;
    }
    let declare = left.is(NodeKind::Identifier) && in_function(cx, node);
    if declare && right.is(NodeKind::Assignment) {
        return None;
    }
    Some(cx.node(
        Assign,
        vec![left.id.into(), right.id.into(), declare.into()],
    ))
}

pub fn augmented_assignment(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let operator = cx.input(node.field("operator")?);
    if matches!(operator.text.as_str(), "//=" | "**=" | "@=") {
        return None;
    }
    let (left, right) = (node.field("left")?, node.field("right")?);
    Some(cx.node(
        AugAssign,
        vec![left.into(), operator.text.as_str().into(), right.into()],
    ))
}

pub fn binary_operator(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let operator = cx.input(node.field("operator")?).text.as_str();
    let (left, right) = (node.field("left")?, node.field("right")?);
    let helper = match operator {
        "@" => return None,
        "//" => {
            cx.add_snippet(FLOORDIV_SNIPPET);
            "__floordiv"
        }
        "**" => "Math.pow",
        _ => {
            return Some(cx.node(BinOp, vec![left.into(), operator.into(), right.into()]));
        }
    };
    let callee = name_node(cx, helper);
    Some(cx.node(
        Call,
        vec![callee.into(), Arg::List(vec![left.into(), right.into()])],
    ))
}

pub fn boolean_operator(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let operator = match cx.input(node.field("operator")?).text.as_str() {
        "and" => "&&",
        "or" => "||",
        _ => return None,
    };
    let (left, right) = (node.field("left")?, node.field("right")?);
    Some(cx.node(BinOp, vec![left.into(), operator.into(), right.into()]))
}

pub fn not_operator(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let argument = cx.input(node.field("argument")?);
    Some(cx.node(
        Unary,
        vec!["!".into(), argument.id.into(), needs_parens(argument).into()],
    ))
}

pub fn unary_operator(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let operator = cx.input(node.field("operator")?).text.as_str();
    let argument = cx.input(node.field("argument")?);
    Some(cx.node(
        Unary,
        vec![operator.into(), argument.id.into(), needs_parens(argument).into()],
    ))
}

/// Binary comparisons only. Python's chained comparisons are declined.
pub fn comparison_operator(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let operands: Vec<InputId> = node.unnamed_children().collect();
    let operators: Vec<&InputNode> = node.fields("operators").map(|id| cx.input(id)).collect();
    let ([left, right], [operator]) = (operands.as_slice(), operators.as_slice()) else {
        return None;
    };
    let spelled = operator.text.split_whitespace().collect::<Vec<_>>().join(" ");
    let operator = match spelled.as_str() {
        "==" | "is" => "===",
        "!=" | "is not" => "!==",
        op @ ("<" | "<=" | ">" | ">=") => op,
        _ => return None,
    };
    Some(cx.node(
        BinOp,
        vec![(*left).into(), operator.into(), (*right).into()],
    ))
}

pub fn parenthesized_expression(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let inner = node.unnamed_children().next()?;
    Some(cx.node(Paren, vec![inner.into()]))
}

pub fn attribute(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let object = node.field("object")?;
    let name = cx.input(node.field("attribute")?);
    Some(cx.node(Attribute, vec![object.into(), name.text.as_str().into()]))
}

pub fn subscript(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let value = node.field("value")?;
    let mut subscripts = node.fields("subscript");
    let index = subscripts.next()?;
    if subscripts.next().is_some() || cx.input(index).is(NodeKind::Slice) {
        return None;
    }
    Some(cx.node(Subscript, vec![value.into(), index.into()]))
}

pub fn list(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    Some(cx.node(Array, vec![inputs(node.children())]))
}

/// `elif` branches become chained `If` nodes attributed to their clause.
pub fn if_statement(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let condition = node.field("condition")?;
    let alternatives: Vec<&InputNode> = node.fields("alternative").map(|id| cx.input(id)).collect();
    let valid = alternatives.iter().all(|alternative| match alternative.kind {
        NodeKind::ElseClause => true,
        NodeKind::ElifClause => alternative.field("condition").is_some(),
        _ => false,
    });
    if !valid {
        return None;
    }
    let consequence = statements(cx, node.field("consequence"));
    let mut orelse = Arg::None;
    for alternative in alternatives.into_iter().rev() {
        orelse = match alternative.field("condition") {
            None => statements(cx, alternative.field("body")),
            Some(elif_condition) => {
                let body = statements(cx, alternative.field("consequence"));
                cx.node_at(
                    alternative,
                    If,
                    vec![elif_condition.into(), body, orelse, true.into()],
                )
                .into()
            }
        };
    }
    Some(cx.node(If, vec![condition.into(), consequence, orelse, false.into()]))
}

pub fn while_statement(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    if node.field("alternative").is_some() {
        return None;
    }
    let condition = node.field("condition")?;
    let body = statements(cx, node.field("body"));
    Some(cx.node(While, vec![condition.into(), body]))
}

/// `for x in xs:` walks `xs` by index through fresh temporaries and assigns
/// `x` at the top of every iteration.
pub fn for_statement(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    if node.field("alternative").is_some() {
        return None;
    }
    let target = cx.input(node.field("left")?);
    if !target.is(NodeKind::Identifier) {
        return None;
    }
    let iterable = node.field("right")?;
    let (index, sequence, length) = (cx.new_name(), cx.new_name(), cx.new_name());
    trace!(%index, %sequence, %length, "loop temporaries");

    let sequence_name = name_node(cx, &sequence);
    let index_name = name_node(cx, &index);
    let element = cx.node(Subscript, vec![sequence_name.into(), index_name.into()]);
    let declare = in_function(cx, node);
    let assign = cx.node(Assign, vec![target.id.into(), element.into(), declare.into()]);
    let first = cx.node(ExpressionStatement, vec![assign.into()]);

    let mut body = vec![Arg::Node(first)];
    if let Arg::List(rest) = statements(cx, node.field("body")) {
        body.extend(rest);
    }
    Some(cx.node(
        ForIndex,
        vec![
            index.into(),
            sequence.into(),
            length.into(),
            iterable.into(),
            Arg::List(body),
        ],
    ))
}

/// Plain `def` with positional parameters only.
pub fn function_definition(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    if node.text.starts_with("async") {
        return None;
    }
    let name = cx.input(node.field("name")?);
    let parameters = cx.input(node.field("parameters")?);
    let mut names = Vec::new();
    for id in parameters.children() {
        let parameter = cx.input(id);
        if !parameter.is(NodeKind::Identifier) {
            return None;
        }
        names.push(Arg::Text(parameter.text.clone()));
    }
    let body = statements(cx, node.field("body"));
    Some(cx.node(
        Function,
        vec![name.text.as_str().into(), Arg::List(names), body],
    ))
}

pub fn return_statement(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let value = node.unnamed_children().next();
    Some(cx.node(Return, vec![value.into()]))
}

pub fn keyword(cx: &mut Lowering<'_>, node: &InputNode) -> Option<TargetId> {
    let keyword = match node.kind {
        NodeKind::BreakStatement => "break",
        NodeKind::ContinueStatement => "continue",
        _ => return None,
    };
    Some(cx.node(Keyword, vec![keyword.into()]))
}

/// Statements with no JavaScript counterpart.
pub fn nothing(cx: &mut Lowering<'_>, _node: &InputNode) -> Option<TargetId> {
    Some(cx.node(Empty, Vec::new()))
}
