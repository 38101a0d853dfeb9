//! Cached rules: guarded branches and the actions they perform.

use std::sync::Arc;

use brisk_ir::{BinaryOp, UnaryOp};
use brisk_value::{
    host_error, index_out_of_bounds, missing_member, not_callable, read_only_member,
    wrong_argument_count, EvalError, EvalResult, HostObject, HostType, List, Value,
};
use parking_lot::RwLock;
use smallvec::SmallVec;
use tracing::debug;

use super::operators::{apply_binary, evaluate_unary, Conversion};
use super::{resolve, DispatchCx, Signature};

/// Argument shapes a branch was resolved for, target first.
pub(crate) type Guard = SmallVec<[brisk_value::Shape; 4]>;

/// How a host member receives its `self`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Receiver {
    /// The dispatch target is the receiver.
    Target,
    /// Static member; no receiver.
    Static,
}

/// An injected instance's method, for bare calls that resolve to it.
#[derive(Clone, Debug)]
pub(crate) struct BoundMethod {
    pub instance: HostObject,
    pub index: usize,
}

/// What a resolved branch does. Indexes point into the member tables of
/// the carried host type.
#[derive(Clone, Debug)]
pub(crate) enum Action {
    NamespaceGet,
    NamespaceSet,
    NamespaceInvoke,
    /// Module namespace, then globals.
    Lookup,
    /// Module namespace, then globals, then the injected instance method
    /// chosen at resolution time.
    CallNamed { fallback: Option<BoundMethod> },
    /// The target is a callable value.
    CallValue,
    GetProperty {
        ty: Arc<HostType>,
        index: usize,
        receiver: Receiver,
    },
    SetProperty {
        ty: Arc<HostType>,
        index: usize,
    },
    InvokeMethod {
        ty: Arc<HostType>,
        index: usize,
        receiver: Receiver,
    },
    Construct {
        ty: Arc<HostType>,
        index: usize,
    },
    GetIndexer {
        ty: Arc<HostType>,
    },
    SetIndexer {
        ty: Arc<HostType>,
    },
    ListGet,
    ListSet,
    StrGet,
    NamespaceGetIndex,
    NamespaceSetIndex,
    Binary {
        op: BinaryOp,
        conversion: Conversion,
    },
    Unary(UnaryOp),
    /// Resolution failed for this shape; raised on every execution.
    Fail(EvalError),
}

pub(crate) struct Branch {
    guard: Guard,
    action: Action,
}

/// The canonical rule for one [`Signature`], holding every branch resolved
/// for it so far in insertion order.
pub struct DispatchRule {
    signature: Signature,
    branches: RwLock<Vec<Arc<Branch>>>,
}

impl DispatchRule {
    pub(crate) fn new(signature: Signature) -> Self {
        DispatchRule {
            signature,
            branches: RwLock::new(Vec::new()),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn branch_count(&self) -> usize {
        self.branches.read().len()
    }

    fn find(&self, guard: &[brisk_value::Shape]) -> Option<Arc<Branch>> {
        self.branches
            .read()
            .iter()
            .find(|branch| branch.guard.as_slice() == guard)
            .cloned()
    }

    /// Perform the operation on `args` (target first, where the operation
    /// has one), resolving and caching a branch on first sight of their
    /// shapes.
    pub(crate) fn run(&self, cx: &DispatchCx<'_>, args: &[Value]) -> EvalResult {
        let guard: Guard = args.iter().map(Value::shape).collect();
        let branch = match self.find(&guard) {
            Some(branch) => branch,
            None => self.insert(cx, guard, args),
        };
        perform(&branch.action, cx, &self.signature, args)
    }

    fn insert(&self, cx: &DispatchCx<'_>, guard: Guard, args: &[Value]) -> Arc<Branch> {
        debug!(signature = %self.signature, ?guard, "dispatch cache miss");
        let action = resolve::resolve(cx, &self.signature, args);
        let mut branches = self.branches.write();
        // another thread may have resolved the same shapes meanwhile
        if let Some(existing) = branches.iter().find(|b| b.guard == guard) {
            return Arc::clone(existing);
        }
        debug!(
            signature = %self.signature,
            ?action,
            branches = branches.len() + 1,
            "new guarded branch"
        );
        let branch = Arc::new(Branch { guard, action });
        branches.push(Arc::clone(&branch));
        branch
    }
}

impl std::fmt::Debug for DispatchRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchRule")
            .field("signature", &self.signature)
            .field("branches", &self.branch_count())
            .finish()
    }
}

/// Call a value the way `callee(args)` does.
///
/// Host objects are callable only by name: the namespaces synthesized for
/// injected instances map method names to the instance itself.
pub(crate) fn call_value(
    cx: &DispatchCx<'_>,
    name: Option<&str>,
    callee: &Value,
    args: &[Value],
) -> EvalResult {
    match (callee, name) {
        (Value::Function(f), _) => {
            if f.arity() != args.len() {
                return Err(wrong_argument_count(f.name(), f.arity(), args.len()));
            }
            f.call(args)
        }
        (Value::Object(_), Some(name)) => {
            let mut full = Vec::with_capacity(args.len() + 1);
            full.push(callee.clone());
            full.extend_from_slice(args);
            cx.engine.invoke_member(name, args.len()).run(cx, &full)
        }
        _ => Err(not_callable(&callee.type_name())),
    }
}

fn coerce(params: &[brisk_value::Param], args: &[Value]) -> Vec<Value> {
    params
        .iter()
        .zip(args)
        .map(|(param, arg)| param.ty.coerce(arg))
        .collect()
}

fn receiver_of<'a>(receiver: Receiver, target: Option<&'a Value>) -> Option<&'a Value> {
    match receiver {
        Receiver::Target => target,
        Receiver::Static => None,
    }
}

fn int_index(index: &Value, len: usize) -> Result<usize, EvalError> {
    let raw = index.as_int().unwrap_or(-1);
    usize::try_from(raw)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_bounds(raw, len))
}

fn named(cx: &DispatchCx<'_>, name: &str) -> Option<Value> {
    cx.module.get(name).or_else(|| cx.host.globals().get(name))
}

fn perform(
    action: &Action,
    cx: &DispatchCx<'_>,
    signature: &Signature,
    args: &[Value],
) -> EvalResult {
    let name = signature.name.as_str();
    let target = args.first();
    let rest = args.get(1..).unwrap_or_default();
    match action {
        Action::Fail(err) => Err(err.clone()),

        Action::NamespaceGet => {
            let ns = target.and_then(Value::as_namespace);
            ns.and_then(|ns| ns.get(name))
                .ok_or_else(|| missing_member(name, "namespace"))
        }
        Action::NamespaceSet => {
            if let (Some(Value::Namespace(ns)), Some(value)) = (target, rest.first()) {
                ns.set(name, value.clone());
                return Ok(value.clone());
            }
            Err(host_error("namespace assignment needs a value"))
        }
        Action::NamespaceInvoke => {
            let callee = target
                .and_then(Value::as_namespace)
                .and_then(|ns| ns.get(name))
                .ok_or_else(|| missing_member(name, "namespace"))?;
            call_value(cx, Some(name), &callee, rest)
        }
        Action::Lookup => named(cx, name).ok_or_else(|| missing_member(name, "module")),
        Action::CallNamed { fallback } => {
            if let Some(callee) = named(cx, name) {
                return call_value(cx, Some(name), &callee, args);
            }
            match fallback {
                Some(bound) => {
                    let ty = bound.instance.host_type();
                    let method = &ty.methods()[bound.index];
                    let receiver = Value::Object(bound.instance.clone());
                    let receiver = (!method.is_static()).then_some(&receiver);
                    method.invoke(receiver, &coerce(method.params(), args))
                }
                None => Err(missing_member(name, "module")),
            }
        }
        Action::CallValue => match target {
            Some(callee) => call_value(cx, None, callee, rest),
            None => Err(not_callable("nothing")),
        },

        Action::GetProperty {
            ty,
            index,
            receiver,
        } => ty.properties()[*index].get(receiver_of(*receiver, target)),
        Action::SetProperty { ty, index } => {
            let property = &ty.properties()[*index];
            let value = rest.first().cloned().unwrap_or(Value::Null);
            if property.set(target, value.clone())? {
                Ok(value)
            } else {
                Err(read_only_member(property.name(), ty.name()))
            }
        }
        Action::InvokeMethod {
            ty,
            index,
            receiver,
        } => {
            let method = &ty.methods()[*index];
            method.invoke(
                receiver_of(*receiver, target),
                &coerce(method.params(), rest),
            )
        }
        Action::Construct { ty, index } => {
            let ctor = &ty.constructors()[*index];
            ctor.construct(ty, &coerce(ctor.params(), rest))
        }

        Action::GetIndexer { ty } => match (ty.indexer(), target, rest.first()) {
            (Some(indexer), Some(target), Some(index)) => indexer.get(target, index),
            _ => Err(brisk_value::not_indexable(ty.name())),
        },
        Action::SetIndexer { ty } => match (ty.indexer(), target, rest) {
            (Some(indexer), Some(target), [index, value]) => indexer
                .set(target, index.clone(), value.clone())
                .unwrap_or_else(|| Err(read_only_member("[]", ty.name()))),
            _ => Err(brisk_value::not_indexable(ty.name())),
        },
        Action::ListGet => {
            let list = target.and_then(Value::as_list).cloned().unwrap_or_default();
            let index = int_index(rest.first().unwrap_or(&Value::Null), list.len())?;
            Ok(list.get(index).unwrap_or(Value::Null))
        }
        Action::ListSet => {
            let list = target.and_then(Value::as_list).cloned().unwrap_or_else(List::new);
            match rest {
                [index, value] => {
                    let index = int_index(index, list.len())?;
                    list.set(index, value.clone());
                    Ok(value.clone())
                }
                _ => Err(host_error("list assignment needs an index and a value")),
            }
        }
        Action::StrGet => {
            let text = target.and_then(Value::as_str).unwrap_or_default();
            let len = text.chars().count();
            let index = int_index(rest.first().unwrap_or(&Value::Null), len)?;
            Ok(text
                .chars()
                .nth(index)
                .map_or(Value::Null, |c| Value::string(c.to_string())))
        }
        Action::NamespaceGetIndex => {
            let key = rest.first().and_then(Value::as_str).unwrap_or_default();
            target
                .and_then(Value::as_namespace)
                .and_then(|ns| ns.get(key))
                .ok_or_else(|| missing_member(key, "namespace"))
        }
        Action::NamespaceSetIndex => match (target, rest) {
            (Some(Value::Namespace(ns)), [Value::Str(key), value]) => {
                ns.set(key, value.clone());
                Ok(value.clone())
            }
            _ => Err(host_error("namespace assignment needs a string key")),
        },

        Action::Binary { op, conversion } => match args {
            [left, right] => apply_binary(*op, *conversion, left, right),
            _ => Err(host_error("binary operator needs two operands")),
        },
        Action::Unary(op) => match target {
            Some(operand) => evaluate_unary(*op, operand),
            None => Err(host_error("unary operator needs an operand")),
        },
    }
}
