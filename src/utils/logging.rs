//! Diagnostic log setup using tracing-subscriber
//!
//! Styled progress output goes to stdout through the `styling` helpers;
//! tracing events go to stderr and stay at `warn` unless `--verbose` is set.

use tracing_subscriber::EnvFilter;

/// Log filter directive for the given verbosity flags
pub fn log_filter(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "warn",
    }
}

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over the flags.
pub fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(verbose, quiet)));

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
