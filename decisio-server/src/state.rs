//! Shared per-process state injected into request handlers.

use std::time::Duration;

use decisio_core::streaming::StreamOptions;

use crate::upstream::ChatCompletionsClient;

/// Application state handed to every handler via axum state.
///
/// Explicitly constructed in `main` from configuration; the upstream
/// client is the only long-lived handle and it is read-only.
#[derive(Clone)]
pub struct AppState {
    pub upstream: ChatCompletionsClient,
    pub stream_options: StreamOptions,
    /// Pacing delay between the initial status event and the upstream
    /// call. Zero disables it.
    pub stream_delay: Duration,
}
