//! `RuntimeBuilder` for assembling a runtime's host surface.

use std::sync::Arc;

use brisk_value::{HostObject, HostUnit};

use super::{Runtime, RuntimeShared, DEFAULT_SCRIPT_EXTENSION};
use crate::dispatch::DispatchEngine;
use crate::interop::Host;

/// Builder for a [`Runtime`].
///
/// Units are published in the order they are added; instances are
/// injected after all units, in order.
pub struct RuntimeBuilder {
    host: Host,
    instances: Vec<HostObject>,
    script_extension: String,
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        RuntimeBuilder::new()
    }
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        RuntimeBuilder {
            host: Host::new(),
            instances: Vec::new(),
            script_extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
        }
    }

    #[must_use]
    pub fn unit(mut self, unit: impl HostUnit) -> Self {
        self.host.load_unit(&unit);
        self
    }

    #[must_use]
    pub fn units<U: HostUnit>(mut self, units: impl IntoIterator<Item = U>) -> Self {
        for unit in units {
            self.host.load_unit(&unit);
        }
        self
    }

    #[must_use]
    pub fn instance(mut self, instance: HostObject) -> Self {
        self.instances.push(instance);
        self
    }

    #[must_use]
    pub fn instances(mut self, instances: impl IntoIterator<Item = HostObject>) -> Self {
        self.instances.extend(instances);
        self
    }

    /// Extension of the sibling file a single-name `import` falls back to,
    /// without the dot.
    #[must_use]
    pub fn script_extension(mut self, extension: &str) -> Self {
        self.script_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn build(mut self) -> Runtime {
        for instance in std::mem::take(&mut self.instances) {
            self.host.inject_instance(instance);
        }
        Runtime {
            shared: Arc::new(RuntimeShared {
                host: self.host,
                engine: DispatchEngine::new(),
                script_extension: self.script_extension,
            }),
        }
    }
}
