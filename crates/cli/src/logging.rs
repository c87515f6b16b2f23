use tracing_subscriber::{fmt, EnvFilter};

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default
/// `warn`). Safe to call more than once; later calls are no-ops.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
