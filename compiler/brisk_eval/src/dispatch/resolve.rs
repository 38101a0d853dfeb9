//! Resolution of a signature against concrete argument values.
//!
//! Runs once per new combination of argument shapes at a rule; the result
//! is cached as a branch. Member names are matched in three passes: the
//! name with its first letter upper-cased, the exact spelling, then any
//! case-insensitive match. The first candidate that accepts the arguments
//! wins; there is no specificity ranking. Member and constructor overloads
//! match argument types strictly; only the bare-call fallback scan applies
//! the implicit Int to Float widening.

use std::sync::Arc;

use brisk_ir::{BinaryOp, UnaryOp};
use brisk_value::{
    host_error, meta_type, missing_member, no_matching_constructor, no_matching_overload,
    not_a_type, not_callable, not_indexable, read_only_member, HostMethod, HostObject, HostType,
    Param, PrimitiveKind, Value,
};
use smallvec::{smallvec, SmallVec};

use super::operators::conversion;
use super::rule::{Action, BoundMethod, Receiver};
use super::{DispatchCx, OpKind, Signature};

/// Outcome of picking a method among a type's members.
enum Selection {
    Found(usize),
    /// Methods with the name exist but none accepts the arguments.
    NoOverload,
    NoMember,
}

#[tracing::instrument(level = "debug", skip_all, fields(op = %signature))]
pub(super) fn resolve(cx: &DispatchCx<'_>, signature: &Signature, args: &[Value]) -> Action {
    let name = signature.name.as_str();
    let (target, rest) = match args.split_first() {
        Some((target, rest)) => (target, rest),
        None => (&Value::Null, args),
    };
    match signature.kind {
        OpKind::GetMember => get_member(cx, name, target),
        OpKind::SetMember => set_member(cx, name, target),
        OpKind::Lookup => Action::Lookup,
        OpKind::Invoke => match target {
            Value::Function(_) => Action::CallValue,
            other => Action::Fail(not_callable(&other.type_name())),
        },
        OpKind::InvokeMember => invoke_member(cx, name, target, rest),
        OpKind::Call => Action::CallNamed {
            fallback: instance_method(cx, name, args),
        },
        OpKind::GetIndex => get_index(cx, target, rest),
        OpKind::SetIndex => set_index(cx, target, rest),
        OpKind::Binary => match (BinaryOp::from_symbol(name), args) {
            (Some(op), [left, right]) => Action::Binary {
                op,
                conversion: conversion(left.shape(), right.shape()),
            },
            _ => Action::Fail(host_error(format!("unknown binary operator `{name}`"))),
        },
        OpKind::Unary => match UnaryOp::from_symbol(name) {
            Some(op) => Action::Unary(op),
            None => Action::Fail(host_error(format!("unknown unary operator `{name}`"))),
        },
        OpKind::CreateInstance => create_instance(target, rest),
    }
}

fn primitive_kind(value: &Value) -> Option<PrimitiveKind> {
    match value {
        Value::Bool(_) => Some(PrimitiveKind::Bool),
        Value::Int(_) => Some(PrimitiveKind::Int),
        Value::Float(_) => Some(PrimitiveKind::Float),
        Value::Str(_) => Some(PrimitiveKind::Str),
        Value::List(_) => Some(PrimitiveKind::List),
        _ => None,
    }
}

/// Host types whose members apply to `target`, in lookup order.
///
/// A type handle exposes its type's static members first and then the
/// instance members of the meta type, with the handle as receiver.
fn member_sources(
    cx: &DispatchCx<'_>,
    target: &Value,
) -> SmallVec<[(Arc<HostType>, Receiver); 2]> {
    match target {
        Value::Object(obj) => smallvec![(Arc::clone(obj.host_type()), Receiver::Target)],
        Value::Type(handle) => smallvec![
            (Arc::clone(handle.host_type()), Receiver::Static),
            (Arc::clone(meta_type()), Receiver::Target),
        ],
        other => primitive_kind(other)
            .map(|kind| {
                cx.host
                    .bound_types(kind)
                    .iter()
                    .map(|ty| (Arc::clone(ty), Receiver::Target))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pass in which `candidate` matches `name`, if any.
fn name_rank(candidate: &str, name: &str, upper: &str) -> Option<u8> {
    if candidate == upper {
        Some(0)
    } else if candidate == name {
        Some(1)
    } else if candidate.eq_ignore_ascii_case(name) {
        Some(2)
    } else {
        None
    }
}

/// Indexes of items named like `name`, best pass first, registration order
/// within a pass.
fn ranked<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    name: &str,
    item_name: impl Fn(&T) -> &str,
) -> Vec<usize> {
    let upper = capitalized(name);
    let mut found: Vec<(u8, usize)> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| name_rank(item_name(item), name, &upper).map(|rank| (rank, i)))
        .collect();
    found.sort_by_key(|&(rank, _)| rank);
    found.into_iter().map(|(_, i)| i).collect()
}

fn accepts(params: &[Param], args: &[Value], converted: bool) -> bool {
    params.len() == args.len()
        && params.iter().zip(args).all(|(param, arg)| {
            !param.out
                && if converted {
                    param.ty.accepts_converted(arg)
                } else {
                    param.ty.accepts(arg)
                }
        })
}

/// First overload whose parameters accept `args` without conversion.
fn first_accepting<'a>(
    mut candidates: impl Iterator<Item = (usize, &'a [Param])>,
    args: &[Value],
) -> Option<usize> {
    candidates
        .find(|(_, params)| accepts(params, args, false))
        .map(|(i, _)| i)
}

fn select_method(ty: &HostType, name: &str, is_static: bool, args: &[Value]) -> Selection {
    let methods = ty.methods();
    let named: Vec<usize> = ranked(methods, name, HostMethod::name)
        .into_iter()
        .filter(|&i| methods[i].is_static() == is_static)
        .collect();
    if named.is_empty() {
        return Selection::NoMember;
    }
    let candidates = named.iter().map(|&i| (i, methods[i].params()));
    match first_accepting(candidates, args) {
        Some(index) => Selection::Found(index),
        None => Selection::NoOverload,
    }
}

fn select_property(ty: &HostType, name: &str, is_static: bool) -> Option<usize> {
    let properties = ty.properties();
    ranked(properties, name, brisk_value::HostProperty::name)
        .into_iter()
        .find(|&i| properties[i].is_static() == is_static)
}

fn get_member(cx: &DispatchCx<'_>, name: &str, target: &Value) -> Action {
    if let Value::Namespace(_) = target {
        return Action::NamespaceGet;
    }
    for (ty, receiver) in member_sources(cx, target) {
        if let Some(index) = select_property(&ty, name, receiver == Receiver::Static) {
            return Action::GetProperty {
                ty,
                index,
                receiver,
            };
        }
    }
    Action::Fail(missing_member(name, &target.type_name()))
}

fn set_member(cx: &DispatchCx<'_>, name: &str, target: &Value) -> Action {
    if let Value::Namespace(_) = target {
        return Action::NamespaceSet;
    }
    for (ty, receiver) in member_sources(cx, target) {
        if let Some(index) = select_property(&ty, name, receiver == Receiver::Static) {
            let property = &ty.properties()[index];
            if !property.is_writable() || receiver == Receiver::Static {
                return Action::Fail(read_only_member(property.name(), ty.name()));
            }
            return Action::SetProperty { ty, index };
        }
    }
    Action::Fail(missing_member(name, &target.type_name()))
}

fn invoke_member(cx: &DispatchCx<'_>, name: &str, target: &Value, args: &[Value]) -> Action {
    if let Value::Namespace(_) = target {
        return Action::NamespaceInvoke;
    }
    let mut overloaded = false;
    for (ty, receiver) in member_sources(cx, target) {
        match select_method(&ty, name, receiver == Receiver::Static, args) {
            Selection::Found(index) => {
                return Action::InvokeMethod {
                    ty,
                    index,
                    receiver,
                }
            }
            Selection::NoOverload => overloaded = true,
            Selection::NoMember => {}
        }
    }
    let type_name = target.type_name();
    if overloaded {
        Action::Fail(no_matching_overload(name, &type_name, args.len()))
    } else {
        Action::Fail(missing_member(name, &type_name))
    }
}

fn create_instance(target: &Value, args: &[Value]) -> Action {
    let Some(ty) = target.as_host_type() else {
        return Action::Fail(not_a_type(&target.type_name()));
    };
    let candidates = ty
        .constructors()
        .iter()
        .enumerate()
        .map(|(i, ctor)| (i, ctor.params()));
    match first_accepting(candidates, args) {
        Some(index) => Action::Construct {
            ty: Arc::clone(ty),
            index,
        },
        None => Action::Fail(no_matching_constructor(ty.name(), args.len())),
    }
}

/// Host type whose indexer serves `target`: its own for objects, a bound
/// type's for primitives.
fn indexer_type(cx: &DispatchCx<'_>, target: &Value) -> Option<Arc<HostType>> {
    match target {
        Value::Object(obj) => obj
            .host_type()
            .indexer()
            .map(|_| Arc::clone(obj.host_type())),
        other => primitive_kind(other).and_then(|kind| {
            cx.host
                .bound_types(kind)
                .iter()
                .find(|ty| ty.indexer().is_some())
                .cloned()
        }),
    }
}

fn get_index(cx: &DispatchCx<'_>, target: &Value, args: &[Value]) -> Action {
    match (target, args) {
        (Value::List(_), [Value::Int(_)]) => Action::ListGet,
        (Value::Str(_), [Value::Int(_)]) => Action::StrGet,
        (Value::Namespace(_), [Value::Str(_)]) => Action::NamespaceGetIndex,
        _ => match indexer_type(cx, target) {
            Some(ty) => Action::GetIndexer { ty },
            None => Action::Fail(not_indexable(&target.type_name())),
        },
    }
}

fn set_index(cx: &DispatchCx<'_>, target: &Value, args: &[Value]) -> Action {
    match (target, args) {
        (Value::List(_), [Value::Int(_), _]) => Action::ListSet,
        (Value::Namespace(_), [Value::Str(_), _]) => Action::NamespaceSetIndex,
        _ => match indexer_type(cx, target) {
            Some(ty) => Action::SetIndexer { ty },
            None => Action::Fail(not_indexable(&target.type_name())),
        },
    }
}

/// Parameters a bare call may bind to in the case-insensitive pass.
fn loosely_accepts(params: &[Param], args: &[Value]) -> bool {
    params.len() == args.len()
        && params.iter().zip(args).all(|(param, arg)| {
            !param.out
                && param.ty.is_primitive()
                && param.ty != brisk_value::ParamType::Char
                && param.ty.accepts_converted(arg)
        })
}

fn bound_method(instance: &HostObject, name: &str, args: &[Value]) -> Option<BoundMethod> {
    let methods = instance.host_type().methods();
    let upper = capitalized(name);
    let by_name = |wanted: &str| {
        methods
            .iter()
            .position(|m| m.name() == wanted && accepts(m.params(), args, true))
    };
    by_name(&upper)
        .or_else(|| by_name(name))
        .or_else(|| {
            methods.iter().position(|m| {
                m.name().eq_ignore_ascii_case(name) && loosely_accepts(m.params(), args)
            })
        })
        .map(|index| BoundMethod {
            instance: instance.clone(),
            index,
        })
}

/// The method a bare `name(args)` falls back to when neither the module
/// nor the globals define `name`: the first injected instance exposing a
/// compatible method.
fn instance_method(cx: &DispatchCx<'_>, name: &str, args: &[Value]) -> Option<BoundMethod> {
    cx.host
        .instances()
        .iter()
        .find_map(|instance| bound_method(instance, name, args))
}
