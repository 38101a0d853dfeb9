//! Host type registry.
//!
//! Rust has no runtime reflection, so hosts describe the surface they expose
//! to scripts explicitly: each [`HostType`] is a registration table of
//! methods, properties, constructors and an optional indexer, built once with
//! [`HostTypeBuilder`]. The dispatch engine only talks to this table: it
//! scans [`HostType::methods`] and [`HostType::properties`] by name, calls
//! [`HostMethod::invoke`] or [`HostConstructor::construct`], and checks
//! arguments with [`ParamType::accepts`].
//!
//! Host types are grouped into [`HostUnit`]s, the loadable libraries a
//! runtime is constructed from.

mod builder;
mod meta;
mod object;
mod param;
mod unit;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub use builder::HostTypeBuilder;
pub use meta::meta_type;
pub use object::HostObject;
pub use param::{Param, ParamType};
pub use unit::{HostUnit, TypeLibrary};

use crate::{EvalResult, Value};

/// Identity of a registered host type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct HostTypeId(u64);

impl HostTypeId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        HostTypeId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Built-in value kinds a host type can describe.
///
/// A type bound to `Str` supplies the members of every string value, so
/// `'abc'.ToUpper()` resolves exactly like a call on a host object.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrimitiveKind {
    Bool,
    Int,
    Float,
    Str,
    List,
}

/// Instance methods receive `Some(receiver)`, static ones `None`.
pub(crate) type HostFn = Arc<dyn Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync>;
pub(crate) type SetterFn =
    Arc<dyn Fn(Option<&Value>, Value) -> Result<(), crate::EvalError> + Send + Sync>;
pub(crate) type CtorFn = Arc<dyn Fn(&Arc<HostType>, &[Value]) -> EvalResult + Send + Sync>;

pub struct HostMethod {
    name: String,
    params: Vec<Param>,
    is_static: bool,
    func: HostFn,
}

impl HostMethod {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Call with arguments already matched against `params`.
    pub fn invoke(&self, receiver: Option<&Value>, args: &[Value]) -> EvalResult {
        (self.func)(receiver, args)
    }
}

pub struct HostProperty {
    name: String,
    is_static: bool,
    getter: HostFn,
    setter: Option<SetterFn>,
}

impl HostProperty {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    pub fn get(&self, receiver: Option<&Value>) -> EvalResult {
        (self.getter)(receiver, &[])
    }

    /// Returns `Ok(false)` for read-only properties.
    pub fn set(&self, receiver: Option<&Value>, value: Value) -> Result<bool, crate::EvalError> {
        match &self.setter {
            Some(setter) => setter(receiver, value).map(|()| true),
            None => Ok(false),
        }
    }
}

pub struct HostConstructor {
    params: Vec<Param>,
    func: CtorFn,
}

impl HostConstructor {
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Build an instance of `ty`, the type this constructor is registered on.
    pub fn construct(&self, ty: &Arc<HostType>, args: &[Value]) -> EvalResult {
        (self.func)(ty, args)
    }
}

/// `target[index]` support.
pub struct HostIndexer {
    get: HostFn,
    set: Option<HostFn>,
}

impl HostIndexer {
    pub fn get(&self, receiver: &Value, index: &Value) -> EvalResult {
        (self.get)(Some(receiver), std::slice::from_ref(index))
    }

    /// `None` when the indexer is read-only.
    pub fn set(&self, receiver: &Value, index: Value, value: Value) -> Option<EvalResult> {
        self.set
            .as_ref()
            .map(|set| set(Some(receiver), &[index, value]))
    }
}

/// Registration table for one host type.
pub struct HostType {
    id: HostTypeId,
    name: String,
    full_name: String,
    primitive: Option<PrimitiveKind>,
    supertypes: Vec<HostTypeId>,
    methods: Vec<HostMethod>,
    properties: Vec<HostProperty>,
    constructors: Vec<HostConstructor>,
    indexer: Option<HostIndexer>,
}

impl HostType {
    /// Start describing a type by its dotted full name, e.g. `System.Math`.
    pub fn builder(full_name: impl Into<String>) -> HostTypeBuilder {
        HostTypeBuilder::new(full_name.into())
    }

    #[inline]
    pub fn id(&self) -> HostTypeId {
        self.id
    }

    /// Last segment of the full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn primitive(&self) -> Option<PrimitiveKind> {
        self.primitive
    }

    pub fn is_subtype_of(&self, other: HostTypeId) -> bool {
        self.id == other || self.supertypes.contains(&other)
    }

    pub fn methods(&self) -> &[HostMethod] {
        &self.methods
    }

    pub fn properties(&self) -> &[HostProperty] {
        &self.properties
    }

    pub fn constructors(&self) -> &[HostConstructor] {
        &self.constructors
    }

    pub fn indexer(&self) -> Option<&HostIndexer> {
        self.indexer.as_ref()
    }
}

impl fmt::Debug for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostType")
            .field("full_name", &self.full_name)
            .field("methods", &self.methods.len())
            .field("properties", &self.properties.len())
            .field("constructors", &self.constructors.len())
            .finish_non_exhaustive()
    }
}
