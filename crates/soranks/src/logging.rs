//! Process-wide logging
//!
//! Everything logs through the `log` facade. `main` installs an `env_logger`
//! backend once; tests build the same logger with `is_test(true)` and install it
//! with `try_init` so output is captured per test.

use env_logger::{Builder, Env};

/// Environment variable that overrides the level filter (`env_logger` syntax)
pub const LOG_ENV: &str = "SORANKS_LOG";

/// Default filter: `info`, or `trace` with `--verbose`
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "trace"
    } else {
        "info"
    }
}

/// Logger builder with the soranks defaults applied
pub fn builder(verbose: bool) -> Builder {
    let mut builder = Builder::from_env(Env::default().filter_or(LOG_ENV, default_filter(verbose)));
    builder.format_timestamp_secs();
    builder
}

/// Installs the process logger; called once from `main`
pub fn init(verbose: bool) {
    builder(verbose).init();
}
