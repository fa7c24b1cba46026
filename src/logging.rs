//! Diagnostic logging
//!
//! Diagnostics go to stderr through `tracing`. User-facing output (results,
//! errors, deprecation notices) is printed directly by the commands and is
//! not affected by the filter.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit filter, e.g. `partwright=debug`.
pub const LOG_ENV: &str = "PARTWRIGHT_LOG";

/// Filter directive for a `-v` count.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `PARTWRIGHT_LOG` when set and valid, otherwise the `-v` derived level.
pub fn filter_for(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbose)))
}

/// Install the global subscriber. Calling it again is harmless.
pub fn init(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
