//! Process-wide `env_logger` setup for the `freq` binary.
//! Records go to stderr; stdout carries only dump output.

use std::sync::Once;

use env_logger::{Builder, Target};
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install the process-wide logger. Quiet by default; `RUST_LOG`
/// overrides the levels set here.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("chain_map", LevelFilter::Warn)
            .filter_module("freq", LevelFilter::Warn)
            .target(Target::Stderr)
            .format_timestamp_millis()
            .parse_default_env();

        // Another logger may already be installed (e.g. by a test harness).
        let _ = builder.try_init();
    });
}
