//! Callable values.

use std::fmt;
use std::sync::Arc;

use crate::{EvalResult, Value};

/// Anything a script can call with `f(args)`.
///
/// The evaluator implements this for lowered script functions and lambdas;
/// hosts can hand scripts plain Rust closures through [`NativeFunction`].
pub trait ScriptCallable: Send + Sync {
    fn name(&self) -> &str;

    fn arity(&self) -> usize;

    /// Invoke with exactly `arity()` arguments; the caller checks the count.
    fn call(&self, args: &[Value]) -> EvalResult;
}

#[derive(Clone)]
pub struct FunctionValue(Arc<dyn ScriptCallable>);

impl FunctionValue {
    pub fn new(callable: impl ScriptCallable + 'static) -> Self {
        FunctionValue(Arc::new(callable))
    }

    pub fn from_arc(callable: Arc<dyn ScriptCallable>) -> Self {
        FunctionValue(callable)
    }

    /// Wrap a Rust closure.
    pub fn native(
        name: impl Into<String>,
        arity: usize,
        f: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        FunctionValue::new(NativeFunction {
            name: name.into(),
            arity,
            func: Box::new(f),
        })
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn arity(&self) -> usize {
        self.0.arity()
    }

    pub fn call(&self, args: &[Value]) -> EvalResult {
        self.0.call(args)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &FunctionValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}/{}>", self.name(), self.arity())
    }
}

type NativeFn = Box<dyn Fn(&[Value]) -> EvalResult + Send + Sync>;

/// A host closure exposed as a script function.
pub struct NativeFunction {
    name: String,
    arity: usize,
    func: NativeFn,
}

impl ScriptCallable for NativeFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, args: &[Value]) -> EvalResult {
        (self.func)(args)
    }
}
