//! Lowering, late-binding dispatch and the runtime facade for Brisk.
//!
//! The pipeline for one unit of source:
//!
//! 1. [`brisk_parse::parse`] produces the syntax tree.
//! 2. Lowering walks the tree against a chain of compile-time scopes and
//!    produces closures. Declared names become frame slots; every
//!    operation whose meaning depends on runtime values becomes a call
//!    through a dispatch rule.
//! 3. Running the closures resolves each rule once per combination of
//!    argument shapes, against the host registration tables, and caches
//!    the result.
//!
//! [`Runtime`] ties these together and owns the shared state.

mod dispatch;
mod errors;
mod exec;
mod interop;
mod lower;
mod runtime;
mod scope;

pub use dispatch::{CacheStats, DispatchRule, OpKind, Signature, TableStats};
pub use errors::{LowerError, LowerErrorKind, ScriptError};
pub use runtime::{Runtime, RuntimeBuilder, DEFAULT_SCRIPT_EXTENSION};
