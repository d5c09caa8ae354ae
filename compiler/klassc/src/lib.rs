//! Klass command-line harness.
//!
//! Drives `klass_eval` from the shell: a declaration-throughput benchmark
//! comparing a shared signature cache against per-batch caches, and a short
//! demo of the generated methods.

pub mod commands;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber, once per process.
///
/// Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=klass_eval=debug klass demo` logs every compiled body.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
