//! The type of type handles.
//!
//! `System.Type` describes the value `Math` evaluates to when `Math` names a
//! host type. Member lookups on a type handle that find no static member
//! fall back to this table, so `Math.Name` works like it does on any
//! reflected type object.

use std::sync::{Arc, OnceLock};

use super::{HostType, ParamType};
use crate::{host_error, Value};

fn handle(value: &Value) -> Result<&Arc<HostType>, crate::EvalError> {
    value
        .as_host_type()
        .ok_or_else(|| host_error("expected a type handle"))
}

/// Shared `System.Type` registration.
pub fn meta_type() -> &'static Arc<HostType> {
    static META: OnceLock<Arc<HostType>> = OnceLock::new();
    META.get_or_init(|| {
        HostType::builder("System.Type")
            .property("Name", |recv| Ok(Value::string(handle(recv)?.name())))
            .property("FullName", |recv| {
                Ok(Value::string(handle(recv)?.full_name()))
            })
            .method("IsAssignableFrom", [ParamType::TypeOf], |recv, args| {
                let this = handle(recv)?;
                let other = args
                    .first()
                    .and_then(Value::as_host_type)
                    .ok_or_else(|| host_error("IsAssignableFrom expects a type"))?;
                Ok(Value::Bool(other.is_subtype_of(this.id())))
            })
            .method("ToString", Vec::<ParamType>::new(), |recv, _| {
                Ok(Value::string(handle(recv)?.full_name()))
            })
            .build()
    })
}
