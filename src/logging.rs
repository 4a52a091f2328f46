//! Diagnostic logging setup
//!
//! Logs go to stderr so stdout stays reserved for the report. `RUST_LOG`
//! overrides the level chosen from the CLI flags.

use tracing_subscriber::EnvFilter;

/// Default filter directive
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "modreq=debug"
    } else {
        "warn"
    }
}

/// Initialise stderr logging for the CLI
pub fn init_cli(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
