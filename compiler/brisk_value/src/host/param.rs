//! Declared parameter types and the assignability rules dispatch uses.

use crate::Value;

/// Declared type of a host parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParamType {
    /// Accepts any value, including null.
    Any,
    Bool,
    Int,
    Float,
    /// Character parameters never match script arguments; the fallback scan
    /// skips methods that declare one.
    Char,
    Str,
    List,
    Namespace,
    Function,
    /// The type-of-types: accepts type handles.
    TypeOf,
    /// An instance of the given host type or one of its subtypes.
    Host(super::HostTypeId),
}

impl ParamType {
    /// Value types, as opposed to reference types.
    pub const fn is_primitive(self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::Float | Self::Char)
    }

    /// Strict assignability of the argument's runtime type.
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _)
            | (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Int(_))
            | (Self::Float, Value::Float(_))
            | (Self::Str, Value::Str(_))
            | (Self::List, Value::List(_))
            | (Self::Namespace, Value::Namespace(_))
            | (Self::Function, Value::Function(_))
            | (Self::TypeOf, Value::Type(_)) => true,
            (Self::Host(id), Value::Object(obj)) => obj.host_type().is_subtype_of(id),
            _ => false,
        }
    }

    /// Assignable, or reachable through an implicit widening conversion.
    pub fn accepts_converted(self, value: &Value) -> bool {
        self.accepts(value) || matches!((self, value), (Self::Float, Value::Int(_)))
    }

    /// Apply the widening conversion `accepts_converted` allowed.
    pub fn coerce(self, value: &Value) -> Value {
        match (self, value) {
            (Self::Float, Value::Int(_)) => value.as_float().map_or(Value::Null, Value::Float),
            _ => value.clone(),
        }
    }

}

/// A declared parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub ty: ParamType,
    /// Output parameters are never matched by the fallback scan.
    pub out: bool,
}

impl Param {
    pub const fn new(ty: ParamType) -> Self {
        Param { ty, out: false }
    }

    pub const fn out(ty: ParamType) -> Self {
        Param { ty, out: true }
    }
}

impl From<ParamType> for Param {
    fn from(ty: ParamType) -> Self {
        Param::new(ty)
    }
}
