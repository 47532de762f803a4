use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Diagnostics go to stderr so tables and JSON on stdout stay clean.
/// Verbosity comes from `RUST_LOG`, warnings only by default.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if result.is_err() {
        // Already initialised.
    }
}
