//! Executable form of lowered code.
//!
//! Every node lowers to an [`Exec`] closure. Closures run against an
//! [`Env`]: the current runtime frame, the module namespace and the runtime
//! that owns the dispatch caches. Non-local `break` and `return` travel up
//! through the `Err` side of the result as [`Unwind`] signals until the loop
//! or function body holding the matching label catches them.

use std::sync::Arc;

use brisk_value::{EvalError, Namespace, Value};
use parking_lot::RwLock;

use crate::dispatch::DispatchCx;
use crate::runtime::RuntimeShared;
use crate::scope::VarRef;

/// Identifies a loop's break target or a function's return target within
/// one lowered unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct LabelId(pub u32);

/// Why an [`Exec`] stopped early.
#[derive(Debug)]
pub(crate) enum Unwind {
    Break { target: LabelId, value: Value },
    Return { target: LabelId, value: Value },
    Error(EvalError),
}

impl From<EvalError> for Unwind {
    fn from(err: EvalError) -> Self {
        Unwind::Error(err)
    }
}

impl Unwind {
    /// Convert a signal that reached the top of a unit or function body.
    ///
    /// Lowering guarantees every `break`/`return` has a catching label, so
    /// a stray signal means the label wiring is wrong.
    pub fn into_error(self) -> EvalError {
        match self {
            Unwind::Error(err) => err,
            Unwind::Break { .. } => brisk_value::host_error("`break` escaped its loop"),
            Unwind::Return { .. } => brisk_value::host_error("`return` escaped its function"),
        }
    }
}

pub(crate) type ExecResult = Result<Value, Unwind>;

pub(crate) type Exec = Box<dyn Fn(&Env) -> ExecResult + Send + Sync>;

/// Runtime storage for one module, function or lambda activation.
pub(crate) struct Frame {
    slots: Box<[RwLock<Value>]>,
    parent: Option<Arc<Frame>>,
}

impl Frame {
    pub fn new(size: usize, parent: Option<Arc<Frame>>) -> Arc<Frame> {
        Arc::new(Frame {
            slots: (0..size).map(|_| RwLock::new(Value::Null)).collect(),
            parent,
        })
    }

    /// Frame for a call: arguments fill the first slots.
    pub fn with_args(size: usize, args: &[Value], parent: Arc<Frame>) -> Arc<Frame> {
        let slots = (0..size.max(args.len()))
            .map(|i| RwLock::new(args.get(i).cloned().unwrap_or(Value::Null)))
            .collect();
        Arc::new(Frame {
            slots,
            parent: Some(parent),
        })
    }

    fn ancestor(&self, depth: usize) -> Option<&Frame> {
        let mut frame = self;
        for _ in 0..depth {
            frame = frame.parent.as_deref()?;
        }
        Some(frame)
    }

    pub fn get(&self, var: VarRef) -> Value {
        self.ancestor(var.depth)
            .and_then(|frame| frame.slots.get(var.index))
            .map_or(Value::Null, |slot| slot.read().clone())
    }

    pub fn set(&self, var: VarRef, value: Value) {
        if let Some(slot) = self
            .ancestor(var.depth)
            .and_then(|frame| frame.slots.get(var.index))
        {
            *slot.write() = value;
        }
    }
}

pub(crate) struct Env {
    pub frame: Arc<Frame>,
    pub module: Namespace,
    pub rt: Arc<RuntimeShared>,
}

impl Env {
    pub fn cx(&self) -> DispatchCx<'_> {
        DispatchCx {
            host: &self.rt.host,
            engine: &self.rt.engine,
            module: &self.module,
        }
    }
}
