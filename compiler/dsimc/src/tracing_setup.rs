//! Tracing subscriber setup for the `dsim` binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times; only the first call has an effect.
/// Enable with `RUST_LOG=dsim_types=debug` (resolution steps) or
/// `RUST_LOG=dsimc=debug` (runner). With `tree` set, spans are printed as
/// an indented tree instead of flat lines.
pub fn init_tracing(tree: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_err() {
            return;
        }

        let flat = (!tree).then(|| fmt::layer().with_target(true).with_level(true));
        let hierarchical = tree.then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
        });
        tracing_subscriber::registry()
            .with(flat)
            .with(hierarchical)
            .with(EnvFilter::from_default_env())
            .init();
    });
}
