//! Shared fixtures for phase tests.
//!
//! `Product` and `MetricsModel` are plain Rust data exposed to scripts
//! through hand-written host type registrations, the way an embedding
//! application would expose its own model objects.

mod fixtures;

pub use fixtures::*;

use brisk::{corelib, EvalErrorKind, HostObject, Namespace, Runtime, ScriptError, Value};

/// A runtime with only the `System` library.
pub fn runtime() -> Runtime {
    Runtime::new([corelib::library()])
}

/// A runtime with the `System` library and one injected instance.
pub fn runtime_with(instance: HostObject) -> Runtime {
    Runtime::with_instances([corelib::library()], [instance])
}

/// Evaluate in a fresh module namespace.
pub fn eval(rt: &Runtime, source: &str) -> Value {
    eval_in(rt, source, &rt.create_namespace())
}

pub fn eval_in(rt: &Runtime, source: &str, module: &Namespace) -> Value {
    rt.execute_expr(source, module)
        .unwrap_or_else(|err| panic!("{source:?} failed: {err}"))
}

/// Evaluate expecting a runtime failure.
pub fn eval_err(rt: &Runtime, source: &str) -> EvalErrorKind {
    match rt.execute_expr(source, &rt.create_namespace()) {
        Err(ScriptError::Eval(err)) => err.kind,
        other => panic!("{source:?}: expected a runtime error, got {other:?}"),
    }
}
