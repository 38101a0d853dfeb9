//! Expressions: names, member access, operators, calls, construction and
//! assignment.

use brisk_ir::{BinaryOp, Node, NodeKind, Span, UnaryOp};
use brisk_value::Value;

use super::{at, eval_all, LowerResult, Lowerer};
use crate::errors::{LowerError, LowerErrorKind};
use crate::exec::{Env, Exec, Unwind};
use crate::scope::Scope;

impl Lowerer<'_> {
    /// A scope slot if the name is declared, else a global lookup.
    pub(super) fn lower_named(&self, name: &str, scope: &Scope<'_>, span: Span) -> Exec {
        if let Some(var) = scope.lookup(name) {
            return Box::new(move |env| Ok(env.frame.get(var)));
        }
        let rule = self.rt.engine.lookup(name);
        let at = at(self.position(span));
        Box::new(move |env| rule.run(&env.cx(), &[]).map_err(at))
    }

    pub(super) fn lower_get_member(
        &self,
        target: &Node,
        name: &str,
        scope: &Scope<'_>,
        span: Span,
    ) -> LowerResult {
        let target = self.lower(target, scope)?;
        let rule = self.rt.engine.get_member(name);
        let at = at(self.position(span));
        Ok(Box::new(move |env| {
            let target = target(env)?;
            rule.run(&env.cx(), &[target]).map_err(at)
        }))
    }

    pub(super) fn lower_get_index(
        &self,
        target: &Node,
        index: &Node,
        scope: &Scope<'_>,
        span: Span,
    ) -> LowerResult {
        let target = self.lower(target, scope)?;
        let index = self.lower(index, scope)?;
        let rule = self.rt.engine.get_index();
        let at = at(self.position(span));
        Ok(Box::new(move |env| {
            let args = [target(env)?, index(env)?];
            rule.run(&env.cx(), &args).map_err(at)
        }))
    }

    /// Both operands are always evaluated, `&&` and `||` included.
    pub(super) fn lower_binary(
        &self,
        op: BinaryOp,
        left: &Node,
        right: &Node,
        scope: &Scope<'_>,
        span: Span,
    ) -> LowerResult {
        let left = self.lower(left, scope)?;
        let right = self.lower(right, scope)?;
        let rule = self.rt.engine.binary(op);
        let at = at(self.position(span));
        Ok(Box::new(move |env| {
            let args = [left(env)?, right(env)?];
            rule.run(&env.cx(), &args).map_err(at)
        }))
    }

    pub(super) fn lower_unary(
        &self,
        op: UnaryOp,
        operand: &Node,
        scope: &Scope<'_>,
        span: Span,
    ) -> LowerResult {
        let operand = self.lower(operand, scope)?;
        let rule = self.rt.engine.unary(op);
        let at = at(self.position(span));
        Ok(Box::new(move |env| {
            let operand = operand(env)?;
            rule.run(&env.cx(), &[operand]).map_err(at)
        }))
    }

    /// Assignment evaluates to the assigned value. Assigning a name that is
    /// declared nowhere creates a slot on the module root.
    pub(super) fn lower_assign(
        &self,
        target: &Node,
        value: &Node,
        scope: &Scope<'_>,
        span: Span,
    ) -> LowerResult {
        let at = at(self.position(span));
        match &target.kind {
            NodeKind::Named(name) => {
                let value = self.lower(value, scope)?;
                let var = scope
                    .lookup(name)
                    .unwrap_or_else(|| scope.declare_global(name));
                Ok(Box::new(move |env| {
                    let value = value(env)?;
                    env.frame.set(var, value.clone());
                    Ok(value)
                }))
            }
            NodeKind::Member {
                target: object,
                name,
                ..
            } => {
                let object = self.lower(object, scope)?;
                let value = self.lower(value, scope)?;
                let rule = self.rt.engine.set_member(name);
                Ok(Box::new(move |env| {
                    let args = [object(env)?, value(env)?];
                    rule.run(&env.cx(), &args).map_err(at)
                }))
            }
            NodeKind::Index {
                target: object,
                index,
            } => {
                let object = self.lower(object, scope)?;
                let index = self.lower(index, scope)?;
                let value = self.lower(value, scope)?;
                let rule = self.rt.engine.set_index();
                Ok(Box::new(move |env| {
                    let args = [object(env)?, index(env)?, value(env)?];
                    rule.run(&env.cx(), &args).map_err(at)
                }))
            }
            _ => Err(self.error(LowerErrorKind::NotAssignable, target.span)),
        }
    }

    fn lower_args(&self, args: &[Node], scope: &Scope<'_>) -> Result<Vec<Exec>, LowerError> {
        args.iter().map(|arg| self.lower(arg, scope)).collect()
    }

    /// `target.name(args)` dispatches on the target; a bare `name(args)`
    /// either calls the value in a local slot or, for undeclared names,
    /// goes through the module, the globals and the injected instances.
    pub(super) fn lower_call(
        &self,
        callee: &Node,
        args: &[Node],
        scope: &Scope<'_>,
        span: Span,
    ) -> LowerResult {
        let at = at(self.position(span));
        let arity = args.len();
        match &callee.kind {
            NodeKind::Member { target, name, .. } => {
                let target = self.lower(target, scope)?;
                let args = self.lower_args(args, scope)?;
                let rule = self.rt.engine.invoke_member(name, arity);
                Ok(Box::new(move |env| {
                    let values = with_target(&target, &args, env)?;
                    rule.run(&env.cx(), &values).map_err(at)
                }))
            }
            NodeKind::Named(name) if scope.lookup(name).is_none() => {
                let args = self.lower_args(args, scope)?;
                let rule = self.rt.engine.call(name, arity);
                Ok(Box::new(move |env| {
                    let mut values = Vec::with_capacity(args.len());
                    eval_all(&args, env, &mut values)?;
                    rule.run(&env.cx(), &values).map_err(at)
                }))
            }
            _ => {
                let callee = self.lower(callee, scope)?;
                let args = self.lower_args(args, scope)?;
                let rule = self.rt.engine.invoke(arity);
                Ok(Box::new(move |env| {
                    let values = with_target(&callee, &args, env)?;
                    rule.run(&env.cx(), &values).map_err(at)
                }))
            }
        }
    }

    pub(super) fn lower_new(
        &self,
        target: &Node,
        args: &[Node],
        scope: &Scope<'_>,
        span: Span,
    ) -> LowerResult {
        let at = at(self.position(span));
        let rule = self.rt.engine.create_instance(args.len());
        let target = self.lower(target, scope)?;
        let args = self.lower_args(args, scope)?;
        Ok(Box::new(move |env| {
            let values = with_target(&target, &args, env)?;
            rule.run(&env.cx(), &values).map_err(at)
        }))
    }
}

/// Evaluate the target, then the arguments.
fn with_target(target: &Exec, args: &[Exec], env: &Env) -> Result<Vec<Value>, Unwind> {
    let mut values = Vec::with_capacity(args.len() + 1);
    values.push(target(env)?);
    eval_all(args, env, &mut values)?;
    Ok(values)
}
