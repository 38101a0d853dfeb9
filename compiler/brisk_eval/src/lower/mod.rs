//! Lowering: syntax tree to executable closures.
//!
//! Every node becomes an [`Exec`] built against a compile-time [`Scope`].
//! Names that resolve to a scope slot compile to direct frame accesses;
//! everything whose meaning depends on runtime values (member access,
//! calls, operators, indexing, construction, unresolved names) compiles to
//! a call through the shared [`DispatchRule`](crate::dispatch::DispatchRule)
//! for its signature.

mod expr;
mod function;
mod stmt;

use std::cell::Cell;
use std::sync::Arc;

use brisk_ir::{LineIndex, Literal, Node, NodeKind, Position, Span};
use brisk_value::{EvalError, Value};

use crate::errors::{LowerError, LowerErrorKind};
use crate::exec::{Env, Exec, ExecResult, LabelId, Unwind};
use crate::runtime::RuntimeShared;
use crate::scope::Scope;

pub(crate) type LowerResult = Result<Exec, LowerError>;

pub(crate) struct Lowerer<'a> {
    rt: &'a Arc<RuntimeShared>,
    source: &'a str,
    lines: LineIndex,
    next_label: Cell<u32>,
}

/// Attach the call site's position to an evaluation error.
fn at(position: Position) -> impl Fn(EvalError) -> Unwind + Copy {
    move |err| Unwind::Error(err.at(position))
}

/// Evaluate `codes` left to right.
fn eval_all(codes: &[Exec], env: &Env, out: &mut Vec<Value>) -> Result<(), Unwind> {
    for code in codes {
        out.push(code(env)?);
    }
    Ok(())
}

fn constant(value: Value) -> Exec {
    Box::new(move |_| Ok(value.clone()))
}

impl<'a> Lowerer<'a> {
    pub fn new(rt: &'a Arc<RuntimeShared>, source: &'a str) -> Self {
        Lowerer {
            rt,
            source,
            lines: LineIndex::build(source),
            next_label: Cell::new(0),
        }
    }

    fn position(&self, span: Span) -> Position {
        self.lines.position(self.source, span.start)
    }

    fn error(&self, kind: LowerErrorKind, span: Span) -> LowerError {
        LowerError::new(kind, self.position(span), span)
    }

    fn fresh_label(&self) -> LabelId {
        let id = self.next_label.get();
        self.next_label.set(id + 1);
        LabelId(id)
    }

    /// Lower one node in `scope`, registering any locals it declares.
    pub fn lower(&self, node: &Node, scope: &Scope<'_>) -> LowerResult {
        brisk_stack::ensure_sufficient_stack(|| self.lower_node(node, scope))
    }

    fn lower_node(&self, node: &Node, scope: &Scope<'_>) -> LowerResult {
        let span = node.span;
        match &node.kind {
            NodeKind::Constant(literal) => Ok(constant(match literal {
                Literal::Int(n) => Value::Int(*n),
                Literal::Float(x) => Value::Float(*x),
                Literal::Str(s) => Value::string(s.as_str()),
                Literal::Bool(b) => Value::Bool(*b),
            })),
            NodeKind::Null => Ok(constant(Value::Null)),
            NodeKind::ExprStmt(inner) => self.lower(inner, scope),
            NodeKind::Block(statements) => self.lower_block(statements, scope),

            NodeKind::Named(name) => Ok(self.lower_named(name, scope, span)),
            NodeKind::Member { target, name, .. } => self.lower_get_member(target, name, scope, span),
            NodeKind::Index { target, index } => self.lower_get_index(target, index, scope, span),
            NodeKind::Binary { op, left, right } => self.lower_binary(*op, left, right, scope, span),
            NodeKind::Unary { op, operand } => self.lower_unary(*op, operand, scope, span),
            NodeKind::Assign { target, value } => self.lower_assign(target, value, scope, span),
            NodeKind::Call { callee, args } => self.lower_call(callee, args, scope, span),
            NodeKind::New { target, args } => self.lower_new(target, args, scope, span),

            NodeKind::Var { name, init } => self.lower_var(name, init.as_deref(), scope),
            NodeKind::FunctionDef { name, params, body } => {
                self.lower_function(name, params, body, scope, span)
            }
            NodeKind::Lambda { params, body } => self.lower_lambda(params, body, scope),
            NodeKind::If {
                branches,
                otherwise,
            } => self.lower_if(branches, otherwise.as_deref(), scope),
            NodeKind::Loop { body } => self.lower_loop(body, scope),
            NodeKind::Break { value } => self.lower_break(value.as_deref(), scope, span),
            NodeKind::Return { value } => self.lower_return(value.as_deref(), scope, span),
            NodeKind::Import { path, alias } => {
                self.lower_import(path, alias.as_deref(), scope, span)
            }
        }
    }

    /// Statements in order; the value of the last one is the block's value.
    fn lower_block(&self, statements: &[Node], scope: &Scope<'_>) -> LowerResult {
        match statements {
            [] => Ok(constant(Value::Null)),
            [single] => self.lower(single, scope),
            _ => {
                let codes = statements
                    .iter()
                    .map(|s| self.lower(s, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Box::new(move |env| -> ExecResult {
                    let mut last = Value::Null;
                    for code in &codes {
                        last = code(env)?;
                    }
                    Ok(last)
                }))
            }
        }
    }
}
