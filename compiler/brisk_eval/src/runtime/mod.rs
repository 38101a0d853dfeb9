//! The runtime facade.
//!
//! A [`Runtime`] owns the globals namespace tree and the dispatch caches.
//! Every file or snippet it runs is parsed, lowered against a fresh module
//! scope and executed against a module namespace; rules created while
//! lowering are shared with everything else the runtime has run.

mod builder;

use std::path::Path;
use std::sync::Arc;

use brisk_value::{io_error, HostObject, HostUnit, Namespace, Value};
use tracing::debug;

pub use builder::RuntimeBuilder;

use crate::dispatch::{CacheStats, DispatchEngine};
use crate::errors::ScriptError;
use crate::exec::{Env, Frame};
use crate::interop::Host;
use crate::lower::Lowerer;
use crate::scope::Scope;

/// File extension the import fallback looks for.
pub const DEFAULT_SCRIPT_EXTENSION: &str = "brisk";

/// State shared by a runtime and every function value it created.
pub(crate) struct RuntimeShared {
    pub host: Host,
    pub engine: DispatchEngine,
    pub script_extension: String,
}

impl RuntimeShared {
    /// Parse, lower and run `source` as one unit against `module`.
    fn run_unit(
        self: &Arc<Self>,
        unit: &str,
        source: &str,
        module: &Namespace,
    ) -> Result<Value, ScriptError> {
        let ast = brisk_parse::parse(source)?;
        let scope = Scope::module(unit);
        let code = Lowerer::new(self, source).lower(&ast, &scope)?;
        let env = Env {
            frame: Frame::new(scope.frame_size(), None),
            module: module.clone(),
            rt: Arc::clone(self),
        };
        debug!(unit, slots = scope.frame_size(), "running unit");
        brisk_stack::ensure_sufficient_stack(|| code(&env))
            .map_err(|unwind| ScriptError::Eval(unwind.into_error()))
    }

    pub fn execute_file_in_scope(
        self: &Arc<Self>,
        path: &Path,
        module: &Namespace,
    ) -> Result<Value, ScriptError> {
        let display = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|err| io_error(&display, &err))?;
        let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        module.set("__file__", Value::string(resolved.display().to_string()));
        debug!(file = %resolved.display(), "executing file");
        self.run_unit(&display, &source, module)
    }

    /// Run a file as a new module registered in globals under `name`, or
    /// the file's base name.
    pub fn execute_file_as(
        self: &Arc<Self>,
        path: &Path,
        name: Option<&str>,
    ) -> Result<Namespace, ScriptError> {
        let module = Namespace::new();
        let name = name
            .map(str::to_string)
            .or_else(|| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "main".to_string());
        // registered before running so that a module importing itself sees
        // the partially initialized namespace instead of loading it again;
        // a failed run restores whatever the name was bound to before
        let globals = self.host.globals();
        let previous = globals.get(&name);
        globals.set(&name, Value::Namespace(module.clone()));
        if let Err(err) = self.execute_file_in_scope(path, &module) {
            match previous {
                Some(value) => globals.set(&name, value),
                None => {
                    globals.remove(&name);
                }
            }
            return Err(err);
        }
        Ok(module)
    }
}

/// An embeddable Brisk runtime.
///
/// Cloning is cheap and yields a handle to the same runtime. Runtimes are
/// `Send + Sync`; all shared caches are internally locked.
#[derive(Clone)]
pub struct Runtime {
    shared: Arc<RuntimeShared>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// A runtime exposing the types of `units`.
    pub fn new<U: HostUnit>(units: impl IntoIterator<Item = U>) -> Self {
        RuntimeBuilder::new().units(units).build()
    }

    /// A runtime exposing the types of `units` and the methods of
    /// `instances`, callable by bare name.
    pub fn with_instances<U: HostUnit>(
        units: impl IntoIterator<Item = U>,
        instances: impl IntoIterator<Item = HostObject>,
    ) -> Self {
        RuntimeBuilder::new()
            .units(units)
            .instances(instances)
            .build()
    }

    /// Root of the namespace tree.
    pub fn globals(&self) -> &Namespace {
        self.shared.host.globals()
    }

    /// An empty module namespace for [`execute_expr`](Self::execute_expr)
    /// and [`execute_file_in_scope`](Self::execute_file_in_scope).
    pub fn create_namespace(&self) -> Namespace {
        Namespace::new()
    }

    /// Run a script file as a new module, registered in globals under the
    /// file's base name.
    pub fn execute_file(&self, path: impl AsRef<Path>) -> Result<Namespace, ScriptError> {
        self.shared.execute_file_as(path.as_ref(), None)
    }

    /// Like [`execute_file`](Self::execute_file) with an explicit globals
    /// name.
    pub fn execute_file_as(
        &self,
        path: impl AsRef<Path>,
        name: &str,
    ) -> Result<Namespace, ScriptError> {
        self.shared.execute_file_as(path.as_ref(), Some(name))
    }

    /// Run a script file into `module`, setting `__file__` to its absolute
    /// path. Returns the value of the last statement.
    pub fn execute_file_in_scope(
        &self,
        path: impl AsRef<Path>,
        module: &Namespace,
    ) -> Result<Value, ScriptError> {
        self.shared.execute_file_in_scope(path.as_ref(), module)
    }

    /// Run `source` against `module` and return the value of its last
    /// statement.
    pub fn execute_expr(&self, source: &str, module: &Namespace) -> Result<Value, ScriptError> {
        self.shared.run_unit("<expr>", source, module)
    }

    /// Current size of the dispatch caches.
    pub fn cache_stats(&self) -> CacheStats {
        self.shared.engine.stats()
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("globals", &self.globals().names())
            .field("instances", &self.shared.host.instances().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
