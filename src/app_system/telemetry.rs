use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured `level` when it is set:
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=user_directory::actors=debug,info cargo run
/// ```
pub fn setup_tracing(level: LogLevel) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
