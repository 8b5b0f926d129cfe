//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber once.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks warn, info, or debug.
pub fn init(verbosity: u8) {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
