//! Log filter setup shared by both binaries.

use tracing_subscriber::EnvFilter;

/// Filter from a `RUST_LOG` value, falling back to `default` when unset or invalid.
pub fn log_filter(rust_log: Option<&str>, default: &str) -> EnvFilter {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Install the fmt subscriber on stderr, honoring `RUST_LOG`.
pub fn init(default: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), default))
        .with_writer(std::io::stderr)
        .init();
}
