//! Syntax tree.
//!
//! The tree is owned and boxed rather than arena-allocated: a unit is parsed,
//! lowered once into closures and then dropped, so nothing outlives the
//! lowering pass.

mod operators;

pub use operators::{BinaryOp, UnaryOp};

use crate::Span;

/// Literal constant.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

/// How a member access was written.
///
/// `a.b(...)` is a method call and lowers to an invoke-member dispatch;
/// `a.b` alone lowers to a get-member dispatch.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MemberKind {
    Get,
    MethodCall,
}

/// One `if`/`elseif` arm.
#[derive(Clone, PartialEq, Debug)]
pub struct IfBranch {
    pub test: Node,
    pub body: Node,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub enum NodeKind {
    Constant(Literal),
    Named(String),
    Member {
        target: Box<Node>,
        name: String,
        kind: MemberKind,
    },
    Index {
        target: Box<Node>,
        index: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Assign {
        target: Box<Node>,
        value: Box<Node>,
    },
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    New {
        target: Box<Node>,
        args: Vec<Node>,
    },
    Var {
        name: String,
        init: Option<Box<Node>>,
    },
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Box<Node>,
    },
    Lambda {
        params: Vec<String>,
        body: Box<Node>,
    },
    If {
        branches: Vec<IfBranch>,
        otherwise: Option<Box<Node>>,
    },
    Loop {
        body: Box<Node>,
    },
    Break {
        value: Option<Box<Node>>,
    },
    Return {
        value: Option<Box<Node>>,
    },
    Import {
        path: Vec<String>,
        alias: Option<String>,
    },
    Block(Vec<Node>),
    ExprStmt(Box<Node>),
    Null,
}

impl Node {
    #[inline]
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }

    /// Named references, member accesses and index expressions can be
    /// assigned to.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Named(_) | NodeKind::Member { .. } | NodeKind::Index { .. }
        )
    }
}
