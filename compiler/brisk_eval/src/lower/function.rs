//! Function definitions, lambdas and the closures they evaluate to.

use std::sync::{Arc, Weak};

use brisk_ir::{Node, Span};
use brisk_value::{runtime_dropped, EvalResult, FunctionValue, Namespace, ScriptCallable, Value};

use super::{at, LowerResult, Lowerer};
use crate::errors::LowerErrorKind;
use crate::exec::{Env, Exec, Frame, LabelId, Unwind};
use crate::runtime::RuntimeShared;
use crate::scope::Scope;

/// Lowered body of a function or lambda, shared by every closure created
/// from the same definition.
pub(crate) struct FunctionCode {
    pub name: String,
    pub arity: usize,
    pub frame_size: usize,
    pub body: Exec,
    /// Set when the body contains `return`, and always for lambdas. Falling
    /// off the end of a labelled body yields null.
    pub return_label: Option<LabelId>,
}

/// A function value: code plus the frame it was created in.
pub(crate) struct Closure {
    code: Arc<FunctionCode>,
    frame: Arc<Frame>,
    module: Namespace,
    rt: Weak<RuntimeShared>,
}

impl Closure {
    fn capture(code: &Arc<FunctionCode>, env: &Env) -> FunctionValue {
        FunctionValue::new(Closure {
            code: Arc::clone(code),
            frame: Arc::clone(&env.frame),
            module: env.module.clone(),
            rt: Arc::downgrade(&env.rt),
        })
    }
}

impl ScriptCallable for Closure {
    fn name(&self) -> &str {
        &self.code.name
    }

    fn arity(&self) -> usize {
        self.code.arity
    }

    fn call(&self, args: &[Value]) -> EvalResult {
        let rt = self.rt.upgrade().ok_or_else(runtime_dropped)?;
        let env = Env {
            frame: Frame::with_args(self.code.frame_size, args, Arc::clone(&self.frame)),
            module: self.module.clone(),
            rt,
        };
        let code = &self.code;
        brisk_stack::ensure_sufficient_stack(|| match (code.body)(&env) {
            Ok(_) if code.return_label.is_some() => Ok(Value::Null),
            Ok(value) => Ok(value),
            Err(Unwind::Return { target, value }) if Some(target) == code.return_label => {
                Ok(value)
            }
            Err(other) => Err(other.into_error()),
        })
    }
}

impl Lowerer<'_> {
    fn lower_body(
        &self,
        name: &str,
        params: &[String],
        body: &Node,
        scope: &Scope<'_>,
        always_labelled: bool,
    ) -> Result<Arc<FunctionCode>, crate::errors::LowerError> {
        let inner = Scope::function(scope, name, params);
        if always_labelled {
            inner.return_label_or(|| self.fresh_label());
        }
        let body = self.lower(body, &inner)?;
        Ok(Arc::new(FunctionCode {
            name: name.to_string(),
            arity: params.len(),
            frame_size: inner.frame_size(),
            body,
            return_label: inner.return_label(),
        }))
    }

    /// Only legal directly in a module. Evaluating the definition binds the
    /// function on the module namespace.
    pub(super) fn lower_function(
        &self,
        name: &str,
        params: &[String],
        body: &Node,
        scope: &Scope<'_>,
        span: Span,
    ) -> LowerResult {
        if !scope.is_module() {
            return Err(self.error(
                LowerErrorKind::NotNested {
                    name: name.to_string(),
                },
                span,
            ));
        }
        let code = self.lower_body(name, params, body, scope, false)?;
        let rule = self.rt.engine.set_member(name);
        let at = at(self.position(span));
        Ok(Box::new(move |env| {
            let function = Value::Function(Closure::capture(&code, env));
            let args = [Value::Namespace(env.module.clone()), function];
            rule.run(&env.cx(), &args).map_err(at)
        }))
    }

    pub(super) fn lower_lambda(&self, params: &[String], body: &Node, scope: &Scope<'_>) -> LowerResult {
        let code = self.lower_body("lambda", params, body, scope, true)?;
        Ok(Box::new(move |env| {
            Ok(Value::Function(Closure::capture(&code, env)))
        }))
    }
}
