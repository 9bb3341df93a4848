//! Tracing setup.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Filters come from `RUST_LOG`, or `CORVID_LOG` when `RUST_LOG` is unset;
/// with neither set nothing is installed. `CORVID_LOG_TREE` switches to
/// indented span trees. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(directives) = std::env::var("RUST_LOG").or_else(|_| std::env::var("CORVID_LOG"))
        else {
            return;
        };
        let registry = tracing_subscriber::registry().with(EnvFilter::new(directives));
        // Another subscriber may already be installed, e.g. by a test harness.
        let _ = if std::env::var_os("CORVID_LOG_TREE").is_some() {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
    });
}
