//! Tracing initialization.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber from environment variables.
///
/// `DECISIO_LOG_LEVEL` sets the default filter (default `info`), and the
/// standard `RUST_LOG` overrides it entirely when present.
/// `DECISIO_LOG_FORMAT` selects `text` (default) or `json` output.
/// Double initialization is tolerated so tests can call this freely.
pub fn init_from_env() {
    let level = std::env::var("DECISIO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let format = std::env::var("DECISIO_LOG_FORMAT").unwrap_or_default();
    let result = if format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    };

    // Err means a subscriber is already installed (e.g. by a test
    // harness); keep the existing one.
    let _ = result;
}
