//! Host interop bridge: builds the globals namespace tree.
//!
//! Exported host types are published under their dotted full names, so
//! `System.Text.StringBuilder` becomes `globals.System.Text.StringBuilder`
//! holding a type handle. Injected instances get a namespace named after
//! their type with one entry per method name, each bound to the instance.

use std::sync::Arc;

use brisk_value::{HostObject, HostType, HostUnit, Namespace, PrimitiveKind, Value};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Host surface visible to one runtime.
#[derive(Default)]
pub struct Host {
    globals: Namespace,
    primitives: FxHashMap<PrimitiveKind, Vec<Arc<HostType>>>,
    instances: Vec<HostObject>,
}

impl Host {
    pub fn new() -> Self {
        Host::default()
    }

    /// Root of the namespace tree.
    pub fn globals(&self) -> &Namespace {
        &self.globals
    }

    /// Host types describing the members of a built-in value kind, in
    /// load order.
    pub fn bound_types(&self, kind: PrimitiveKind) -> &[Arc<HostType>] {
        self.primitives
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Injected instances, in injection order.
    pub fn instances(&self) -> &[HostObject] {
        &self.instances
    }

    /// Publish every type a unit exports.
    pub fn load_unit(&mut self, unit: &dyn HostUnit) {
        let types = unit.exported_types();
        debug!(unit = unit.name(), types = types.len(), "loading host unit");
        for ty in types {
            self.publish_type(&ty);
        }
    }

    /// Set the type handle for `ty` under its dotted full name.
    pub fn publish_type(&mut self, ty: &Arc<HostType>) {
        if let Some(kind) = ty.primitive() {
            let bound = self.primitives.entry(kind).or_default();
            if !bound.iter().any(|b| b.id() == ty.id()) {
                bound.push(Arc::clone(ty));
            }
        }
        let mut segments: Vec<&str> = ty.full_name().split('.').collect();
        let Some(leaf) = segments.pop() else {
            return;
        };
        let mut ns = self.globals.clone();
        for segment in segments {
            match ns.child(segment) {
                Some(child) => ns = child,
                None => {
                    warn!(
                        ty = ty.full_name(),
                        segment, "namespace segment already bound to a value; type not published"
                    );
                    return;
                }
            }
        }
        ns.set(leaf, Value::type_handle(Arc::clone(ty)));
    }

    /// Make every method of `instance` callable by bare name through a
    /// namespace named after its type.
    pub fn inject_instance(&mut self, instance: HostObject) {
        let ty = Arc::clone(instance.host_type());
        match self.globals.child(ty.name()) {
            Some(ns) => {
                for method in ty.methods() {
                    ns.set(method.name(), Value::Object(instance.clone()));
                }
                debug!(ty = ty.full_name(), methods = ty.methods().len(), "injected instance");
            }
            None => warn!(
                ty = ty.full_name(),
                "global name already bound to a value; instance methods not published"
            ),
        }
        self.instances.push(instance);
    }
}
