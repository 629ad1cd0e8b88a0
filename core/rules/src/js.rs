//! JavaScript output nodes.
//!
//! Each type is the emission rule of one JavaScript construct. The argument
//! layout expected by every emitter is listed on the type.

use serpent_target::{
    fragment,
    line::{Emission, Fragment, Item, Line},
    tree::{Arg, Emit},
};

fn arg(args: &[Arg], index: usize) -> &Arg {
    args.get(index).unwrap_or(&Arg::None)
}

fn block_end() -> Item {
    Line::new("}").into()
}

/// `[statements]`: the whole program.
#[derive(Debug)]
pub struct Statements;

impl Emit for Statements {
    fn emit(&self, args: &[Arg]) -> Emission {
        Emission::lines(Item::block(arg(args, 0), 0))
    }
}

/// `[expression]`
#[derive(Debug)]
pub struct ExpressionStatement;

impl Emit for ExpressionStatement {
    fn emit(&self, args: &[Arg]) -> Emission {
        Emission::lines(vec![Line::new(arg(args, 0)).delimited().into()])
    }
}

/// `[name]`
#[derive(Debug)]
pub struct Name;

impl Emit for Name {
    fn emit(&self, args: &[Arg]) -> Emission {
        Emission::inline(arg(args, 0))
    }
}

/// `[source text]`
#[derive(Debug)]
pub struct Literal;

impl Emit for Literal {
    fn emit(&self, args: &[Arg]) -> Emission {
        Emission::inline(arg(args, 0))
    }
}

/// `[callee, [arguments]]`
#[derive(Debug)]
pub struct Call;

impl Emit for Call {
    fn emit(&self, args: &[Arg]) -> Emission {
        Emission::Inline(fragment![arg(args, 0), "(", arg(args, 1), ")"])
    }
}

/// `[target, value, declare]`
#[derive(Debug)]
pub struct Assign;

impl Emit for Assign {
    fn emit(&self, args: &[Arg]) -> Emission {
        let mut fragment = Fragment::new();
        if arg(args, 2).as_bool() == Some(true) {
            fragment.push("var ");
        }
        Emission::Inline(fragment.with(arg(args, 0)).with(" = ").with(arg(args, 1)))
    }
}

/// `[target, operator, value]`
#[derive(Debug)]
pub struct AugAssign;

impl Emit for AugAssign {
    fn emit(&self, args: &[Arg]) -> Emission {
        Emission::Inline(fragment![arg(args, 0), " ", arg(args, 1), " ", arg(args, 2)])
    }
}

/// `[left, operator, right]`
#[derive(Debug)]
pub struct BinOp;

impl Emit for BinOp {
    fn emit(&self, args: &[Arg]) -> Emission {
        Emission::Inline(fragment![arg(args, 0), " ", arg(args, 1), " ", arg(args, 2)])
    }
}

/// `[operator, operand, parenthesize]`
#[derive(Debug)]
pub struct Unary;

impl Emit for Unary {
    fn emit(&self, args: &[Arg]) -> Emission {
        if arg(args, 2).as_bool() == Some(true) {
            Emission::Inline(fragment![arg(args, 0), "(", arg(args, 1), ")"])
        } else {
            Emission::Inline(fragment![arg(args, 0), arg(args, 1)])
        }
    }
}

/// `[object, attribute]`
#[derive(Debug)]
pub struct Attribute;

impl Emit for Attribute {
    fn emit(&self, args: &[Arg]) -> Emission {
        Emission::Inline(fragment![arg(args, 0), ".", arg(args, 1)])
    }
}

/// `[value, index]`
#[derive(Debug)]
pub struct Subscript;

impl Emit for Subscript {
    fn emit(&self, args: &[Arg]) -> Emission {
        Emission::Inline(fragment![arg(args, 0), "[", arg(args, 1), "]"])
    }
}

/// `[expression]`
#[derive(Debug)]
pub struct Paren;

impl Emit for Paren {
    fn emit(&self, args: &[Arg]) -> Emission {
        Emission::Inline(fragment!["(", arg(args, 0), ")"])
    }
}

/// `[[elements]]`
#[derive(Debug)]
pub struct Array;

impl Emit for Array {
    fn emit(&self, args: &[Arg]) -> Emission {
        Emission::Inline(fragment!["[", arg(args, 0), "]"])
    }
}

/// `[condition, [body], orelse, chained]`
///
/// `orelse` is either another chained `If`, a list of statements for a plain
/// `else`, or nothing. A chained `If` opens with `} else if` and leaves the
/// closing brace to the head of the chain.
#[derive(Debug)]
pub struct If;

impl Emit for If {
    fn emit(&self, args: &[Arg]) -> Emission {
        let chained = arg(args, 3).as_bool() == Some(true);
        let head = if chained { "} else if (" } else { "if (" };
        let mut items = vec![Line::new(fragment![head, arg(args, 0), ") {"]).into()];
        items.extend(Item::block(arg(args, 1), 1));
        match arg(args, 2) {
            Arg::Node(elif) => items.push(Item::nested(*elif, 0)),
            Arg::List(body) if !body.is_empty() => {
                items.push(Line::new("} else {").into());
                items.extend(Item::block(arg(args, 2), 1));
            }
            _ => {}
        }
        if !chained {
            items.push(block_end());
        }
        Emission::lines(items)
    }
}

/// `[condition, [body]]`
#[derive(Debug)]
pub struct While;

impl Emit for While {
    fn emit(&self, args: &[Arg]) -> Emission {
        let mut items = vec![Line::new(fragment!["while (", arg(args, 0), ") {"]).into()];
        items.extend(Item::block(arg(args, 1), 1));
        items.push(block_end());
        Emission::lines(items)
    }
}

/// `[index, sequence, length, iterable, [body]]`
///
/// Iterates an array through an index. `index`, `sequence` and `length` are
/// the names of the loop temporaries.
#[derive(Debug)]
pub struct ForIndex;

impl Emit for ForIndex {
    fn emit(&self, args: &[Arg]) -> Emission {
        let (index, sequence, length) = (arg(args, 0), arg(args, 1), arg(args, 2));
        let head = fragment![
            "for (var ", index, " = 0, ", sequence, " = ", arg(args, 3), ", ", length, " = ",
            sequence, ".length; ", index, " < ", length, "; ", index, " += 1) {"
        ];
        let mut items = vec![Line::new(head).into()];
        items.extend(Item::block(arg(args, 4), 1));
        items.push(block_end());
        Emission::lines(items)
    }
}

/// `[name, [parameters], [body]]`
#[derive(Debug)]
pub struct Function;

impl Emit for Function {
    fn emit(&self, args: &[Arg]) -> Emission {
        let mut items = vec![
            Line::new(fragment!["function ", arg(args, 0), "(", arg(args, 1), ") {"]).into(),
        ];
        items.extend(Item::block(arg(args, 2), 1));
        items.push(block_end());
        Emission::lines(items)
    }
}

/// `[value]`, value may be absent.
#[derive(Debug)]
pub struct Return;

impl Emit for Return {
    fn emit(&self, args: &[Arg]) -> Emission {
        let line = match arg(args, 0) {
            Arg::None => Line::new("return"),
            value => Line::new(fragment!["return ", value]),
        };
        Emission::lines(vec![line.delimited().into()])
    }
}

/// `[keyword]`: `break`, `continue` and the like.
#[derive(Debug)]
pub struct Keyword;

impl Emit for Keyword {
    fn emit(&self, args: &[Arg]) -> Emission {
        Emission::lines(vec![Line::new(arg(args, 0)).delimited().into()])
    }
}

/// Emits nothing.
#[derive(Debug)]
pub struct Empty;

impl Emit for Empty {
    fn emit(&self, _args: &[Arg]) -> Emission {
        Emission::empty()
    }
}
