//! Host object instances.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::HostType;

/// An instance of a host type: the registration table plus the Rust value
/// its members operate on.
#[derive(Clone)]
pub struct HostObject {
    ty: Arc<HostType>,
    data: Arc<dyn Any + Send + Sync>,
}

impl HostObject {
    pub fn new<T: Any + Send + Sync>(ty: Arc<HostType>, data: T) -> Self {
        HostObject {
            ty,
            data: Arc::new(data),
        }
    }

    /// Wrap a value the host keeps a handle to.
    pub fn from_shared<T: Any + Send + Sync>(ty: Arc<HostType>, data: Arc<T>) -> Self {
        HostObject { ty, data }
    }

    #[inline]
    pub fn host_type(&self) -> &Arc<HostType> {
        &self.ty
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.data.downcast_ref()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &HostObject) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostObject({})", self.ty.full_name())
    }
}
