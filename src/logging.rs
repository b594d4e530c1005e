//! Logger setup.
//!
//! The crate logs through the `log` facade; binaries call [`init`] once to
//! route records to stderr through `env_logger`. Stdout stays reserved for the
//! RPC protocol.

use env_logger::{Builder, Env, Target};

/// Environment variable overriding the configured log filter.
pub const LOG_ENV: &str = "MANGASHELF_LOG";

/// Installs the global logger with `default_filter` unless `MANGASHELF_LOG` is set.
///
/// Returns `false` if a logger was already installed.
pub fn init(default_filter: &str) -> bool {
    Builder::from_env(Env::default().filter_or(LOG_ENV, default_filter))
        .target(Target::Stderr)
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
