//! Diagnostic logging for the unified CLI.
//!
//! Gate verdicts are written directly to stdout/stderr and must stay
//! byte-stable, so tracing output is opt-in (`-v`, `-vv`) and always goes to
//! stderr. The level comes from the flag only; the environment is not read.

use tracing::Level;

pub fn level_for(verbosity: u8) -> Option<Level> {
    match verbosity {
        0 => None,
        1 => Some(Level::INFO),
        2 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

/// Install a stderr subscriber. Does nothing at verbosity 0 or when a
/// subscriber is already set.
pub fn init(verbosity: u8) {
    let Some(level) = level_for(verbosity) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
