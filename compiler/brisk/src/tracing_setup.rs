//! Opt-in diagnostic logging.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber for debug output.
///
/// Safe to call more than once. Nothing is installed unless `BRISK_LOG` (or
/// `RUST_LOG`) holds a filter, e.g. `BRISK_LOG=brisk_eval=debug` to watch
/// dispatch rules being created and extended. Set `BRISK_LOG_TREE` to get
/// indented span trees instead of flat lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(filter) =
            EnvFilter::try_from_env("BRISK_LOG").or_else(|_| EnvFilter::try_from_default_env())
        else {
            return;
        };
        let registry = tracing_subscriber::registry().with(filter);
        // another subscriber may already be installed by the embedder
        let _ = if std::env::var_os("BRISK_LOG_TREE").is_some() {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .try_init()
        };
    });
}
