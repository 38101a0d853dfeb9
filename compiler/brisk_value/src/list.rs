//! Shared, mutable list values.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::Value;

/// A list shared by reference: every copy of the value sees mutations.
#[derive(Clone, Default)]
pub struct List(Arc<RwLock<Vec<Value>>>);

impl List {
    pub fn new() -> Self {
        List::default()
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        List(Arc::new(RwLock::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().get(index).cloned()
    }

    /// Replace the item at `index`; false when out of bounds.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.write().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn push(&self, value: Value) {
        self.0.write().push(value);
    }

    pub fn clear(&self) {
        self.0.write().clear();
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.0.read().iter().any(|item| item == value)
    }

    /// Copy of the current items.
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.read().clone()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &List) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
