use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber; `RUST_LOG` wins over `default_level`.
///
/// Logs go to stderr so JSON printed on stdout stays machine readable.
/// Calling this twice is harmless.
pub fn init_logging(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();
}
