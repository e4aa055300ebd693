//! Diagnostic logging for the binary.
//!
//! Logs go to stderr so stdout only carries the result line. The filter is
//! taken from `ELM_CONSTANTS_LOG`, then `RUST_LOG`, then the default level.

use tracing_subscriber::EnvFilter;

/// Variable holding a log filter directive, e.g. `debug`.
pub const LOG_ENV: &str = "ELM_CONSTANTS_LOG";

/// Builds the log filter.
///
/// `verbose` raises the default from `warn` to `debug`; an explicit filter
/// in the environment always wins.
#[must_use]
pub fn env_filter(verbose: bool) -> EnvFilter {
    for var in [LOG_ENV, "RUST_LOG"] {
        if let Ok(filter) = EnvFilter::try_from_env(var) {
            return filter;
        }
    }

    EnvFilter::new(if verbose { "debug" } else { "warn" })
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
