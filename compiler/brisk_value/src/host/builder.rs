//! `HostTypeBuilder` for registering a host type's members.

use std::any::Any;
use std::sync::Arc;

use super::{
    CtorFn, HostConstructor, HostFn, HostIndexer, HostMethod, HostObject, HostProperty, HostType,
    HostTypeId, Param, PrimitiveKind, SetterFn,
};
use crate::{host_error, EvalError, EvalResult, Value};

/// Builder for a [`HostType`].
///
/// Members are matched in registration order, so register the preferred
/// overload first.
pub struct HostTypeBuilder {
    full_name: String,
    primitive: Option<PrimitiveKind>,
    supertypes: Vec<HostTypeId>,
    methods: Vec<HostMethod>,
    properties: Vec<HostProperty>,
    constructors: Vec<HostConstructor>,
    indexer: Option<HostIndexer>,
}

fn params<P: Into<Param>>(params: impl IntoIterator<Item = P>) -> Vec<Param> {
    params.into_iter().map(Into::into).collect()
}

fn receiver<'a>(receiver: Option<&'a Value>, member: &str) -> Result<&'a Value, EvalError> {
    receiver.ok_or_else(|| host_error(format!("`{member}` needs an instance")))
}

fn downcast<'a, T: 'static>(receiver: Option<&'a Value>, member: &str) -> Result<&'a T, EvalError> {
    receiver
        .and_then(Value::downcast_ref::<T>)
        .ok_or_else(|| host_error(format!("`{member}` called on the wrong receiver")))
}

impl HostTypeBuilder {
    pub(super) fn new(full_name: String) -> Self {
        HostTypeBuilder {
            full_name,
            primitive: None,
            supertypes: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            constructors: Vec::new(),
            indexer: None,
        }
    }

    /// Describe the members of a built-in value kind.
    #[must_use]
    pub fn bind(mut self, kind: PrimitiveKind) -> Self {
        self.primitive = Some(kind);
        self
    }

    /// Make instances of this type assignable to `parent` parameters.
    #[must_use]
    pub fn supertype(mut self, parent: &HostType) -> Self {
        self.supertypes.push(parent.id());
        self.supertypes.extend(parent.supertypes.iter().copied());
        self
    }

    /// Constructor producing an arbitrary value.
    #[must_use]
    pub fn constructor<P: Into<Param>>(
        mut self,
        param_types: impl IntoIterator<Item = P>,
        f: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let func: CtorFn = Arc::new(move |_: &Arc<HostType>, args: &[Value]| f(args));
        self.constructors.push(HostConstructor {
            params: params(param_types),
            func,
        });
        self
    }

    /// Constructor wrapping a Rust value as an instance of this type.
    #[must_use]
    pub fn constructor_of<T: Any + Send + Sync, P: Into<Param>>(
        mut self,
        param_types: impl IntoIterator<Item = P>,
        f: impl Fn(&[Value]) -> Result<T, EvalError> + Send + Sync + 'static,
    ) -> Self {
        let func: CtorFn = Arc::new(move |ty: &Arc<HostType>, args: &[Value]| {
            let data = f(args)?;
            Ok(Value::Object(HostObject::new(Arc::clone(ty), data)))
        });
        self.constructors.push(HostConstructor {
            params: params(param_types),
            func,
        });
        self
    }

    /// Instance method receiving the raw receiver value.
    #[must_use]
    pub fn method<P: Into<Param>>(
        mut self,
        name: &str,
        param_types: impl IntoIterator<Item = P>,
        f: impl Fn(&Value, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let member = name.to_string();
        let func: HostFn = Arc::new(move |recv: Option<&Value>, args: &[Value]| {
            f(receiver(recv, &member)?, args)
        });
        self.methods.push(HostMethod {
            name: name.to_string(),
            params: params(param_types),
            is_static: false,
            func,
        });
        self
    }

    /// Instance method on a host object holding a `T`.
    #[must_use]
    pub fn method_of<T: 'static, P: Into<Param>>(
        mut self,
        name: &str,
        param_types: impl IntoIterator<Item = P>,
        f: impl Fn(&T, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let member = name.to_string();
        let func: HostFn = Arc::new(move |recv: Option<&Value>, args: &[Value]| {
            f(downcast::<T>(recv, &member)?, args)
        });
        self.methods.push(HostMethod {
            name: name.to_string(),
            params: params(param_types),
            is_static: false,
            func,
        });
        self
    }

    #[must_use]
    pub fn static_method<P: Into<Param>>(
        mut self,
        name: &str,
        param_types: impl IntoIterator<Item = P>,
        f: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let func: HostFn = Arc::new(move |_: Option<&Value>, args: &[Value]| f(args));
        self.methods.push(HostMethod {
            name: name.to_string(),
            params: params(param_types),
            is_static: true,
            func,
        });
        self
    }

    /// Read-only instance property over the raw receiver value.
    #[must_use]
    pub fn property(
        mut self,
        name: &str,
        getter: impl Fn(&Value) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let member = name.to_string();
        let getter: HostFn = Arc::new(move |recv: Option<&Value>, _: &[Value]| {
            getter(receiver(recv, &member)?)
        });
        self.properties.push(HostProperty {
            name: name.to_string(),
            is_static: false,
            getter,
            setter: None,
        });
        self
    }

    /// Read-only instance property on a host object holding a `T`.
    #[must_use]
    pub fn property_of<T: 'static>(
        mut self,
        name: &str,
        getter: impl Fn(&T) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let member = name.to_string();
        let getter: HostFn = Arc::new(move |recv: Option<&Value>, _: &[Value]| {
            getter(downcast::<T>(recv, &member)?)
        });
        self.properties.push(HostProperty {
            name: name.to_string(),
            is_static: false,
            getter,
            setter: None,
        });
        self
    }

    /// Writable instance property on a host object holding a `T`.
    ///
    /// `T` needs interior mutability; the setter only gets `&T`.
    #[must_use]
    pub fn property_of_mut<T: 'static>(
        mut self,
        name: &str,
        getter: impl Fn(&T) -> EvalResult + Send + Sync + 'static,
        setter: impl Fn(&T, Value) -> Result<(), EvalError> + Send + Sync + 'static,
    ) -> Self {
        let get_member = name.to_string();
        let set_member = name.to_string();
        let getter: HostFn = Arc::new(move |recv: Option<&Value>, _: &[Value]| {
            getter(downcast::<T>(recv, &get_member)?)
        });
        let setter: SetterFn =
            Arc::new(move |recv: Option<&Value>, value: Value| {
                setter(downcast::<T>(recv, &set_member)?, value)
            });
        self.properties.push(HostProperty {
            name: name.to_string(),
            is_static: false,
            getter,
            setter: Some(setter),
        });
        self
    }

    #[must_use]
    pub fn static_property(
        mut self,
        name: &str,
        getter: impl Fn() -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let getter: HostFn = Arc::new(move |_: Option<&Value>, _: &[Value]| getter());
        self.properties.push(HostProperty {
            name: name.to_string(),
            is_static: true,
            getter,
            setter: None,
        });
        self
    }

    /// `target[index]` and, with a setter, `target[index] = value`.
    #[must_use]
    pub fn indexer(
        mut self,
        get: impl Fn(&Value, &Value) -> EvalResult + Send + Sync + 'static,
        set: Option<Box<dyn Fn(&Value, &Value, Value) -> EvalResult + Send + Sync>>,
    ) -> Self {
        let get: HostFn = Arc::new(move |recv: Option<&Value>, args: &[Value]| {
            let recv = receiver(recv, "indexer")?;
            get(recv, args.first().unwrap_or(&Value::Null))
        });
        let set = set.map(|set| -> HostFn {
            Arc::new(move |recv: Option<&Value>, args: &[Value]| {
                let recv = receiver(recv, "indexer")?;
                match args {
                    [index, value] => set(recv, index, value.clone()),
                    _ => Err(host_error("indexer assignment needs an index and a value")),
                }
            })
        });
        self.indexer = Some(HostIndexer { get, set });
        self
    }

    pub fn build(self) -> Arc<HostType> {
        let name = self
            .full_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.full_name)
            .to_string();
        Arc::new(HostType {
            id: HostTypeId::fresh(),
            name,
            full_name: self.full_name,
            primitive: self.primitive,
            supertypes: self.supertypes,
            methods: self.methods,
            properties: self.properties,
            constructors: self.constructors,
            indexer: self.indexer,
        })
    }
}
