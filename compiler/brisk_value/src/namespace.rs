//! Dynamically extensible name tables.
//!
//! Modules, the globals tree and the synthesized per-instance tables are all
//! `Namespace`s. Keys keep the spelling they were first set with; lookups
//! try the exact spelling first and then fall back to an ASCII
//! case-insensitive match, the same rule host member lookup uses.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Value;

#[derive(Default)]
struct Table {
    entries: FxHashMap<String, Value>,
    /// lower-cased key -> key as stored in `entries`
    folded: FxHashMap<String, String>,
}

impl Table {
    fn key_for(&self, name: &str) -> Option<&str> {
        if let Some((key, _)) = self.entries.get_key_value(name) {
            return Some(key);
        }
        self.folded.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    fn insert(&mut self, name: &str, value: Value) {
        if let Some(existing) = self.key_for(name).map(str::to_string) {
            self.entries.insert(existing, value);
            return;
        }
        self.folded
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| name.to_string());
        self.entries.insert(name.to_string(), value);
    }

    fn remove(&mut self, name: &str) -> Option<Value> {
        let key = self.key_for(name)?.to_string();
        let folded = key.to_ascii_lowercase();
        if self.folded.get(&folded) == Some(&key) {
            self.folded.remove(&folded);
        }
        self.entries.remove(&key)
    }
}

/// A shared, thread-safe name table. Clones refer to the same table.
#[derive(Clone, Default)]
pub struct Namespace(Arc<RwLock<Table>>);

impl Namespace {
    pub fn new() -> Self {
        Namespace::default()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        let table = self.0.read();
        let key = table.key_for(name)?;
        table.entries.get(key).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.read().key_for(name).is_some()
    }

    /// Set a member, overwriting an existing entry whose name matches
    /// case-insensitively.
    pub fn set(&self, name: &str, value: Value) {
        self.0.write().insert(name, value);
    }

    /// Remove the member matching `name`, returning its value.
    pub fn remove(&self, name: &str) -> Option<Value> {
        self.0.write().remove(name)
    }

    /// The child namespace under `name`, created if absent.
    ///
    /// Returns `None` when `name` is already bound to something other than
    /// a namespace.
    pub fn child(&self, name: &str) -> Option<Namespace> {
        let mut table = self.0.write();
        if let Some(key) = table.key_for(name) {
            return match table.entries.get(key) {
                Some(Value::Namespace(ns)) => Some(ns.clone()),
                _ => None,
            };
        }
        let child = Namespace::new();
        table.insert(name, Value::Namespace(child.clone()));
        Some(child)
    }

    /// Member names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.read().entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.0.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().entries.is_empty()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Namespace) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Namespace").field(&self.names()).finish()
    }
}
