//! Late-binding dispatch engine.
//!
//! Every dynamic operation a lowered unit performs (member get/set, calls,
//! indexing, operators, construction) goes through a [`DispatchRule`]. Rules
//! are canonical per [`Signature`]: all call sites with the same operation
//! kind, name and argument count share one rule. A rule accumulates guarded
//! branches, one per combination of argument shapes seen so far, so the
//! resolution work in [`resolve`] runs once per call shape.
//!
//! Each operation kind has its own table behind its own mutex; rule lookup
//! happens at lowering time, so the tables are not touched on the hot path.

mod operators;
mod resolve;
mod rule;

use std::fmt;
use std::sync::Arc;

use brisk_value::Namespace;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::trace;

pub use rule::DispatchRule;

use crate::interop::Host;

/// Operation kinds, one cache table each.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    GetMember,
    SetMember,
    /// Implicit global read of an unresolved name.
    Lookup,
    Invoke,
    InvokeMember,
    /// Bare `name(args)` call of an unresolved name.
    Call,
    GetIndex,
    SetIndex,
    Binary,
    Unary,
    CreateInstance,
}

impl OpKind {
    pub const ALL: [OpKind; 11] = [
        OpKind::GetMember,
        OpKind::SetMember,
        OpKind::Lookup,
        OpKind::Invoke,
        OpKind::InvokeMember,
        OpKind::Call,
        OpKind::GetIndex,
        OpKind::SetIndex,
        OpKind::Binary,
        OpKind::Unary,
        OpKind::CreateInstance,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OpKind::GetMember => "get-member",
            OpKind::SetMember => "set-member",
            OpKind::Lookup => "lookup",
            OpKind::Invoke => "invoke",
            OpKind::InvokeMember => "invoke-member",
            OpKind::Call => "call",
            OpKind::GetIndex => "get-index",
            OpKind::SetIndex => "set-index",
            OpKind::Binary => "binary",
            OpKind::Unary => "unary",
            OpKind::CreateInstance => "create-instance",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call shape: the key of a cached rule.
///
/// `name` is the member name as written (case-preserving), the operator
/// symbol for operator kinds, and empty otherwise. `arity` counts arguments
/// after the target.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub kind: OpKind,
    pub name: String,
    pub arity: usize,
}

impl Signature {
    pub fn new(kind: OpKind, name: impl Into<String>, arity: usize) -> Self {
        Signature {
            kind,
            name: name.into(),
            arity,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}/{}", self.kind, self.arity)
        } else {
            write!(f, "{} `{}`/{}", self.kind, self.name, self.arity)
        }
    }
}

/// What resolution and cached actions can see besides their arguments.
pub(crate) struct DispatchCx<'a> {
    pub host: &'a Host,
    pub engine: &'a DispatchEngine,
    /// Module namespace of the running unit.
    pub module: &'a Namespace,
}

#[derive(Default)]
struct RuleTable {
    rules: Mutex<FxHashMap<Signature, Arc<DispatchRule>>>,
}

/// Owner of the canonical rules, one table per [`OpKind`].
pub struct DispatchEngine {
    tables: [RuleTable; OpKind::ALL.len()],
}

impl Default for DispatchEngine {
    fn default() -> Self {
        DispatchEngine::new()
    }
}

impl DispatchEngine {
    pub fn new() -> Self {
        DispatchEngine {
            tables: std::array::from_fn(|_| RuleTable::default()),
        }
    }

    fn table(&self, kind: OpKind) -> &RuleTable {
        &self.tables[kind as usize]
    }

    /// The shared rule for `signature`, created on first request.
    pub fn rule(&self, signature: Signature) -> Arc<DispatchRule> {
        let mut rules = self.table(signature.kind).rules.lock();
        if let Some(rule) = rules.get(&signature) {
            return Arc::clone(rule);
        }
        trace!(%signature, "new dispatch rule");
        let rule = Arc::new(DispatchRule::new(signature.clone()));
        rules.insert(signature, Arc::clone(&rule));
        rule
    }

    pub fn get_member(&self, name: &str) -> Arc<DispatchRule> {
        self.rule(Signature::new(OpKind::GetMember, name, 0))
    }

    pub fn set_member(&self, name: &str) -> Arc<DispatchRule> {
        self.rule(Signature::new(OpKind::SetMember, name, 1))
    }

    pub fn lookup(&self, name: &str) -> Arc<DispatchRule> {
        self.rule(Signature::new(OpKind::Lookup, name, 0))
    }

    pub fn invoke(&self, arity: usize) -> Arc<DispatchRule> {
        self.rule(Signature::new(OpKind::Invoke, "", arity))
    }

    pub fn invoke_member(&self, name: &str, arity: usize) -> Arc<DispatchRule> {
        self.rule(Signature::new(OpKind::InvokeMember, name, arity))
    }

    pub fn call(&self, name: &str, arity: usize) -> Arc<DispatchRule> {
        self.rule(Signature::new(OpKind::Call, name, arity))
    }

    pub fn get_index(&self) -> Arc<DispatchRule> {
        self.rule(Signature::new(OpKind::GetIndex, "", 1))
    }

    pub fn set_index(&self) -> Arc<DispatchRule> {
        self.rule(Signature::new(OpKind::SetIndex, "", 2))
    }

    pub fn binary(&self, op: brisk_ir::BinaryOp) -> Arc<DispatchRule> {
        self.rule(Signature::new(OpKind::Binary, op.as_symbol(), 1))
    }

    pub fn unary(&self, op: brisk_ir::UnaryOp) -> Arc<DispatchRule> {
        self.rule(Signature::new(OpKind::Unary, op.as_symbol(), 0))
    }

    pub fn create_instance(&self, arity: usize) -> Arc<DispatchRule> {
        self.rule(Signature::new(OpKind::CreateInstance, "", arity))
    }

    pub fn stats(&self) -> CacheStats {
        let tables = OpKind::ALL
            .iter()
            .map(|&kind| {
                let rules = self.table(kind).rules.lock();
                TableStats {
                    kind,
                    signatures: rules.len(),
                    branches: rules.values().map(|rule| rule.branch_count()).sum(),
                }
            })
            .collect();
        CacheStats { tables }
    }
}

/// Size of one cache table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableStats {
    pub kind: OpKind,
    /// Distinct call shapes.
    pub signatures: usize,
    /// Guarded branches across those shapes.
    pub branches: usize,
}

/// Snapshot of every cache table, see [`Runtime::cache_stats`](crate::Runtime::cache_stats).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    tables: Vec<TableStats>,
}

impl CacheStats {
    pub fn table(&self, kind: OpKind) -> TableStats {
        self.tables
            .iter()
            .copied()
            .find(|t| t.kind == kind)
            .unwrap_or(TableStats {
                kind,
                signatures: 0,
                branches: 0,
            })
    }

    pub fn tables(&self) -> &[TableStats] {
        &self.tables
    }

    pub fn total_signatures(&self) -> usize {
        self.tables.iter().map(|t| t.signatures).sum()
    }

    pub fn total_branches(&self) -> usize {
        self.tables.iter().map(|t| t.branches).sum()
    }
}
