//! decisio-server
//!
//! Axum service that forwards decision requests to an OpenAI-compatible
//! chat-completions API and re-streams the model's structured output as
//! typed Server-Sent Events, using the decisio-core engine.
#![deny(unsafe_code)]

pub mod config;
pub mod prompts;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod upstream;

use std::time::Duration;

use decisio_core::streaming::StreamOptions;

use crate::config::ServerConfig;
use crate::state::AppState;
use crate::upstream::ChatCompletionsClient;

/// Build the shared application state from configuration.
///
/// The upstream client and HTTP connection pool are constructed once here
/// and injected into every request handler - nothing is process-global.
pub fn build_state(config: ServerConfig) -> AppState {
    let http = reqwest::Client::new();
    let stream_options = if config.mask_errors {
        StreamOptions::production()
    } else {
        StreamOptions::development()
    };
    AppState {
        upstream: ChatCompletionsClient::new(http, config.upstream),
        stream_options,
        stream_delay: Duration::from_millis(config.stream_delay_ms),
    }
}
