//! Structured log output for the command-line tool

use tracing::Level;

/// Log level implied by the `--quiet` and `--verbose` flags; quiet wins
pub const fn log_level(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::WARN
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the global stderr subscriber
///
/// Returns false when a subscriber was already installed.
pub fn init_logging(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
