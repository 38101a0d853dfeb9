#![allow(clippy::unwrap_used, clippy::expect_used)]


use brisk_ir::{Node, NodeKind};

use crate::{parse, SyntaxError};

/// Parse and return the statements of the unit.
pub(super) fn statements(source: &str) -> Vec<Node> {
    match parse(source).unwrap().kind {
        NodeKind::Block(statements) => statements,
        other => panic!("unit should be a block, got {other:?}"),
    }
}

/// Parse a single expression statement and return the expression.
pub(super) fn expr(source: &str) -> Node {
    let mut statements = statements(source);
    assert_eq!(statements.len(), 1, "expected one statement in {source:?}");
    match statements.remove(0).kind {
        NodeKind::ExprStmt(inner) => *inner,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

pub(super) fn parse_err(source: &str) -> SyntaxError {
    parse(source).unwrap_err()
}

/// Compact rendering of an expression tree for precedence assertions.
pub(super) fn sexpr(node: &Node) -> String {
    use brisk_ir::Literal;
    match &node.kind {
        NodeKind::Constant(Literal::Int(v)) => v.to_string(),
        NodeKind::Constant(Literal::Float(v)) => format!("{v:?}"),
        NodeKind::Constant(Literal::Str(s)) => format!("'{s}'"),
        NodeKind::Constant(Literal::Bool(b)) => b.to_string(),
        NodeKind::Named(n) => n.clone(),
        NodeKind::Binary { op, left, right } => {
            format!("({} {} {})", op.as_symbol(), sexpr(left), sexpr(right))
        }
        NodeKind::Unary { op, operand } => format!("({} {})", op.as_symbol(), sexpr(operand)),
        NodeKind::Assign { target, value } => format!("(= {} {})", sexpr(target), sexpr(value)),
        NodeKind::Member { target, name, kind } => {
            format!("(.{name}{kind:?} {})", sexpr(target))
        }
        NodeKind::Call { callee, args } => {
            let args: Vec<String> = args.iter().map(sexpr).collect();
            format!("(call {} [{}])", sexpr(callee), args.join(" "))
        }
        NodeKind::Index { target, index } => format!("([] {} {})", sexpr(target), sexpr(index)),
        NodeKind::New { target, args } => {
            let args: Vec<String> = args.iter().map(sexpr).collect();
            format!("(new {} [{}])", sexpr(target), args.join(" "))
        }
        other => format!("{other:?}"),
    }
}
