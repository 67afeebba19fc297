//! Logging setup
//!
//! `RUST_LOG` wins when set; otherwise the given level (default `info`).

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber
pub fn init_logger() {
    init_logger_with(None, false);
}

/// Initialize the global subscriber with an explicit level and format.
///
/// Calling it twice is harmless: the second call leaves the first
/// subscriber in place.
pub fn init_logger_with(log_level: Option<&str>, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}
