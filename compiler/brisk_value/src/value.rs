//! The runtime value type.

use std::fmt;
use std::sync::Arc;

use crate::host::{HostObject, HostType, HostTypeId};
use crate::{FunctionValue, List, Namespace};

/// A script value.
///
/// Cloning is cheap: heap payloads are reference counted, and lists,
/// namespaces and host objects are shared by reference.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    List(List),
    Namespace(Namespace),
    Function(FunctionValue),
    /// A host type itself, as opposed to an instance of it.
    Type(TypeHandle),
    Object(HostObject),
}

/// Runtime shape of a value, the unit dispatch guards test against.
///
/// Host objects and type handles carry their type identity so that two
/// different host types never share a cached branch.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Shape {
    Null,
    Bool,
    Int,
    Float,
    Str,
    List,
    Namespace,
    Function,
    Type(HostTypeId),
    Object(HostTypeId),
}

/// Script-level reference to a host type.
#[derive(Clone)]
pub struct TypeHandle(pub Arc<HostType>);

impl TypeHandle {
    #[inline]
    pub fn host_type(&self) -> &Arc<HostType> {
        &self.0
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHandle({})", self.0.full_name())
    }
}

impl Value {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn type_handle(ty: Arc<HostType>) -> Self {
        Value::Type(TypeHandle(ty))
    }

    pub fn shape(&self) -> Shape {
        match self {
            Value::Null => Shape::Null,
            Value::Bool(_) => Shape::Bool,
            Value::Int(_) => Shape::Int,
            Value::Float(_) => Shape::Float,
            Value::Str(_) => Shape::Str,
            Value::List(_) => Shape::List,
            Value::Namespace(_) => Shape::Namespace,
            Value::Function(_) => Shape::Function,
            Value::Type(t) => Shape::Type(t.0.id()),
            Value::Object(o) => Shape::Object(o.host_type().id()),
        }
    }

    /// Name used in error messages.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => "string".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Namespace(_) => "namespace".to_string(),
            Value::Function(_) => "function".to_string(),
            Value::Type(t) => format!("type {}", t.0.full_name()),
            Value::Object(o) => o.host_type().name().to_string(),
        }
    }

    /// Condition test: booleans are themselves, everything else is true
    /// unless null. Zero and the empty string are true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Null => false,
            _ => true,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Floats, and integers widened to float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            #[allow(clippy::cast_precision_loss, reason = "script ints widen like host ints")]
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_namespace(&self) -> Option<&Namespace> {
        match self {
            Value::Namespace(ns) => Some(ns),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HostObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The underlying host type of a type handle.
    pub fn as_host_type(&self) -> Option<&Arc<HostType>> {
        match self {
            Value::Type(t) => Some(&t.0),
            _ => None,
        }
    }

    /// Downcast a host object's payload.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.as_object().and_then(HostObject::downcast_ref)
    }
}

impl PartialEq for Value {
    /// Primitives compare by value, strings by content, everything else by
    /// identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            #[allow(clippy::float_cmp, reason = "script equality is exact")]
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Namespace(a), Value::Namespace(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Type(a), Value::Type(b)) => a.0.id() == b.0.id(),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::List(list) => {
                f.write_str("[")?;
                for (i, item) in list.snapshot().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Namespace(_) => write!(f, "<namespace>"),
            Value::Function(func) => write!(f, "<function {}>", func.name()),
            Value::Type(t) => write!(f, "{}", t.0.full_name()),
            Value::Object(o) => write!(f, "<{}>", o.host_type().name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Null => write!(f, "Null"),
            other => write!(f, "{}({other})", other.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<Namespace> for Value {
    fn from(ns: Namespace) -> Self {
        Value::Namespace(ns)
    }
}

impl From<HostObject> for Value {
    fn from(obj: HostObject) -> Self {
        Value::Object(obj)
    }
}
