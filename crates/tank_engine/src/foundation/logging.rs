//! Logging utilities
//!
//! Thin wrapper over `env_logger` so binaries and tests share one
//! initialization path. Library modules log through the `log` facade only.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from the environment (`RUST_LOG`).
pub fn init() {
    env_logger::init();
}

/// Initialize with a default filter for when `RUST_LOG` is unset.
///
/// Handy for binaries that should produce output out of the box, e.g.
/// `init_with_default("info")`.
pub fn init_with_default(filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}
