//! Statements: declarations, conditionals, loops, control transfer and
//! imports.

use std::path::{Path, PathBuf};

use brisk_ir::{IfBranch, Node, Span};
use brisk_value::{import_not_found, EvalError, Namespace, Value};
use tracing::debug;

use super::{at, constant, LowerResult, Lowerer};
use crate::errors::LowerErrorKind;
use crate::exec::{Env, Exec, Unwind};
use crate::scope::Scope;

impl Lowerer<'_> {
    /// `var name [= init]` declares in the current scope. The initializer
    /// is lowered first, so it still sees an outer `name`.
    pub(super) fn lower_var(&self, name: &str, init: Option<&Node>, scope: &Scope<'_>) -> LowerResult {
        let init = init.map(|init| self.lower(init, scope)).transpose()?;
        let var = scope.declare_local(name);
        Ok(match init {
            Some(init) => Box::new(move |env| {
                let value = init(env)?;
                env.frame.set(var, value.clone());
                Ok(value)
            }),
            None => constant(Value::Null),
        })
    }

    /// Chained from the last branch back; without `else` the chain ends in
    /// `false`.
    pub(super) fn lower_if(
        &self,
        branches: &[IfBranch],
        otherwise: Option<&Node>,
        scope: &Scope<'_>,
    ) -> LowerResult {
        let mut arms = Vec::with_capacity(branches.len());
        for branch in branches {
            let test = self.lower(&branch.test, scope)?;
            let body = self.lower(&branch.body, scope)?;
            arms.push((test, body));
        }
        let mut chain: Exec = match otherwise {
            Some(node) => self.lower(node, scope)?,
            None => constant(Value::Bool(false)),
        };
        for (test, body) in arms.into_iter().rev() {
            let next = chain;
            chain = Box::new(move |env| {
                if test(env)?.is_truthy() {
                    body(env)
                } else {
                    next(env)
                }
            });
        }
        Ok(chain)
    }

    /// Runs until a `break` targeting this loop; the loop's value is the
    /// break value.
    pub(super) fn lower_loop(&self, body: &Node, scope: &Scope<'_>) -> LowerResult {
        let label = self.fresh_label();
        let inner = Scope::loop_body(scope, label);
        let body = self.lower(body, &inner)?;
        Ok(Box::new(move |env| loop {
            match body(env) {
                Ok(_) => {}
                Err(Unwind::Break { target, value }) if target == label => return Ok(value),
                Err(other) => return Err(other),
            }
        }))
    }

    pub(super) fn lower_break(&self, value: Option<&Node>, scope: &Scope<'_>, span: Span) -> LowerResult {
        let Some(target) = scope.enclosing_loop() else {
            return Err(self.error(LowerErrorKind::BreakOutsideLoop, span));
        };
        let value = value.map(|v| self.lower(v, scope)).transpose()?;
        Ok(Box::new(move |env| {
            let value = match &value {
                Some(code) => code(env)?,
                None => Value::Null,
            };
            Err(Unwind::Break { target, value })
        }))
    }

    /// A bare `return` yields `true`.
    pub(super) fn lower_return(
        &self,
        value: Option<&Node>,
        scope: &Scope<'_>,
        span: Span,
    ) -> LowerResult {
        let Some(function) = scope.enclosing_function() else {
            return Err(self.error(LowerErrorKind::ReturnOutsideFunction, span));
        };
        let target = function.return_label_or(|| self.fresh_label());
        let value = value.map(|v| self.lower(v, scope)).transpose()?;
        Ok(Box::new(move |env| {
            let value = match &value {
                Some(code) => code(env)?,
                None => Value::Bool(true),
            };
            Err(Unwind::Return { target, value })
        }))
    }

    /// `import a.b.c [as x]` binds the resolved value on the module
    /// namespace and evaluates to null.
    pub(super) fn lower_import(
        &self,
        path: &[String],
        alias: Option<&str>,
        scope: &Scope<'_>,
        span: Span,
    ) -> LowerResult {
        if !scope.is_module() {
            return Err(self.error(LowerErrorKind::ImportOutsideModule, span));
        }
        let binding = alias
            .or_else(|| path.last().map(String::as_str))
            .unwrap_or_default()
            .to_string();
        let path = path.to_vec();
        let at = at(self.position(span));
        Ok(Box::new(move |env| {
            let value = import(env, &path).map_err(at)?;
            env.module.set(&binding, value);
            Ok(Value::Null)
        }))
    }
}

/// Walk `path` through the globals.
fn lookup_path(globals: &Namespace, path: &[String]) -> Option<Value> {
    let (first, rest) = path.split_first()?;
    let mut value = globals.get(first)?;
    for segment in rest {
        value = value.as_namespace()?.get(segment)?;
    }
    Some(value)
}

/// Script file a single-segment import falls back to, next to the
/// importing module.
fn sibling_file(env: &Env, name: &str) -> PathBuf {
    let dir = env
        .module
        .get("__file__")
        .and_then(|file| file.as_str().map(PathBuf::from))
        .and_then(|file| file.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(format!("{name}.{}", env.rt.script_extension))
}

fn import(env: &Env, path: &[String]) -> Result<Value, EvalError> {
    if let Some(value) = lookup_path(env.rt.host.globals(), path) {
        return Ok(value);
    }
    let dotted = path.join(".");
    let [name] = path else {
        return Err(import_not_found(&dotted, "for dotted names"));
    };
    let file = sibling_file(env, name);
    if !file.is_file() {
        return Err(import_not_found(name, &file.display().to_string()));
    }
    debug!(module = %name, file = %file.display(), "importing script file");
    env.rt
        .execute_file_as(&file, Some(name))
        .map(Value::Namespace)
        .map_err(crate::errors::ScriptError::into_eval)
}
