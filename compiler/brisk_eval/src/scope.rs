//! Compile-time lexical scopes.
//!
//! A `Scope` exists only while a unit is being lowered. Scopes form a chain
//! through borrowed parent links; module, function and lambda scopes own a
//! runtime frame, loop scopes store their locals in the frame of the nearest
//! owner. Names are folded to ASCII lower case.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use crate::exec::LabelId;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) struct ScopeFlags: u8 {
        const MODULE = 1 << 0;
        /// Function or lambda body; the target of `return`.
        const FUNCTION = 1 << 1;
        /// Loop body; the target of `break`.
        const LOOP = 1 << 2;
    }
}

/// Resolved location of a variable: `depth` frames up the chain, slot
/// `index` there.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct VarRef {
    pub depth: usize,
    pub index: usize,
}

/// Slot counter for one runtime frame, shared by the owner scope and any
/// loop scopes nested in it.
#[derive(Default, Debug)]
struct FrameLayout {
    size: Cell<usize>,
}

impl FrameLayout {
    fn alloc(&self) -> usize {
        let index = self.size.get();
        self.size.set(index + 1);
        index
    }
}

pub(crate) struct Scope<'p> {
    name: String,
    parent: Option<&'p Scope<'p>>,
    flags: ScopeFlags,
    params: FxHashMap<String, usize>,
    locals: RefCell<FxHashMap<String, usize>>,
    layout: Rc<FrameLayout>,
    return_label: Cell<Option<LabelId>>,
    break_label: Option<LabelId>,
}

fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl<'p> Scope<'p> {
    fn with(
        name: String,
        parent: Option<&'p Scope<'p>>,
        flags: ScopeFlags,
        layout: Rc<FrameLayout>,
    ) -> Self {
        Scope {
            name,
            parent,
            flags,
            params: FxHashMap::default(),
            locals: RefCell::new(FxHashMap::default()),
            layout,
            return_label: Cell::new(None),
            break_label: None,
        }
    }

    /// Root scope of a compiled unit.
    pub fn module(name: impl Into<String>) -> Self {
        Scope::with(
            name.into(),
            None,
            ScopeFlags::MODULE,
            Rc::default(),
        )
    }

    /// Function or lambda body. Parameters take the first slots, in order.
    pub fn function(parent: &'p Scope<'p>, name: impl Into<String>, params: &[String]) -> Self {
        let mut scope = Scope::with(
            name.into(),
            Some(parent),
            ScopeFlags::FUNCTION,
            Rc::default(),
        );
        for param in params {
            let index = scope.layout.alloc();
            scope.params.insert(normalize(param), index);
        }
        scope
    }

    pub fn loop_body(parent: &'p Scope<'p>, label: LabelId) -> Self {
        let mut scope = Scope::with(
            "loop".to_string(),
            Some(parent),
            ScopeFlags::LOOP,
            Rc::clone(&parent.layout),
        );
        scope.break_label = Some(label);
        scope
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_module(&self) -> bool {
        self.flags.contains(ScopeFlags::MODULE)
    }

    fn owns_frame(&self) -> bool {
        self.flags.intersects(ScopeFlags::MODULE | ScopeFlags::FUNCTION)
    }

    /// Slots the runtime frame for this scope's owner needs.
    pub fn frame_size(&self) -> usize {
        self.layout.size.get()
    }

    /// Parameters, then locals, then the parent chain.
    pub fn lookup(&self, name: &str) -> Option<VarRef> {
        let key = normalize(name);
        let mut depth = 0;
        let mut scope = Some(self);
        while let Some(current) = scope {
            let found = current
                .params
                .get(&key)
                .copied()
                .or_else(|| current.locals.borrow().get(&key).copied());
            if let Some(index) = found {
                return Some(VarRef { depth, index });
            }
            if current.owns_frame() {
                depth += 1;
            }
            scope = current.parent;
        }
        None
    }

    /// Get or create a local of this scope, shadowing outer names.
    pub fn declare_local(&self, name: &str) -> VarRef {
        let key = normalize(name);
        let mut locals = self.locals.borrow_mut();
        let index = *locals.entry(key).or_insert_with(|| self.layout.alloc());
        VarRef { depth: 0, index }
    }

    /// Get or create a slot on the module root.
    pub fn declare_global(&self, name: &str) -> VarRef {
        let mut depth = 0;
        let mut scope = self;
        while let Some(parent) = scope.parent {
            if scope.owns_frame() {
                depth += 1;
            }
            scope = parent;
        }
        let slot = scope.declare_local(name);
        VarRef {
            depth,
            index: slot.index,
        }
    }

    /// Break label of the nearest loop, not looking past a function body.
    pub fn enclosing_loop(&self) -> Option<LabelId> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if current.flags.contains(ScopeFlags::LOOP) {
                return current.break_label;
            }
            if current.owns_frame() {
                return None;
            }
            scope = current.parent;
        }
        None
    }

    /// Nearest function or lambda body.
    pub fn enclosing_function(&self) -> Option<&Scope<'p>> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if current.flags.contains(ScopeFlags::FUNCTION) {
                return Some(current);
            }
            scope = current.parent;
        }
        None
    }

    pub fn return_label(&self) -> Option<LabelId> {
        self.return_label.get()
    }

    /// The return label, allocating it with `fresh` on first use.
    pub fn return_label_or(&self, fresh: impl FnOnce() -> LabelId) -> LabelId {
        if let Some(label) = self.return_label.get() {
            return label;
        }
        let label = fresh();
        self.return_label.set(Some(label));
        label
    }
}

#[cfg(test)]
mod tests;
