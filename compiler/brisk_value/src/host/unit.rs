//! Loadable groups of host types.

use std::sync::Arc;

use super::HostType;

/// A library of host types a runtime is built from.
///
/// Each exported type is published in the runtime's globals under its
/// dotted full name, so `System.Math` becomes `globals.System.Math`.
pub trait HostUnit: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    fn exported_types(&self) -> Vec<Arc<HostType>>;
}

/// A [`HostUnit`] assembled from already built types.
#[derive(Default)]
pub struct TypeLibrary {
    name: String,
    types: Vec<Arc<HostType>>,
}

impl TypeLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        TypeLibrary {
            name: name.into(),
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, ty: Arc<HostType>) -> Self {
        self.types.push(ty);
        self
    }

    pub fn add(&mut self, ty: Arc<HostType>) {
        self.types.push(ty);
    }

    pub fn types(&self) -> &[Arc<HostType>] {
        &self.types
    }
}

impl HostUnit for TypeLibrary {
    fn name(&self) -> &str {
        &self.name
    }

    fn exported_types(&self) -> Vec<Arc<HostType>> {
        self.types.clone()
    }
}

impl<U: HostUnit + ?Sized> HostUnit for &U {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn exported_types(&self) -> Vec<Arc<HostType>> {
        (**self).exported_types()
    }
}

impl<U: HostUnit + ?Sized> HostUnit for Box<U> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn exported_types(&self) -> Vec<Arc<HostType>> {
        (**self).exported_types()
    }
}
