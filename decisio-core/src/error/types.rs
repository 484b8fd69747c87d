//! Core error type for the decision streaming engine.

use thiserror::Error;

/// Errors surfaced by the engine and its HTTP-facing callers.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid or missing process configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Transport-level HTTP failure while talking to the upstream model API.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The upstream API answered with a non-success status.
    #[error("API error {code}: {message}")]
    ApiError { code: u16, message: String },

    /// A payload failed protocol-level parsing.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Failure while consuming the upstream event stream.
    #[error("Stream error: {0}")]
    StreamError(String),

    /// Catch-all for internal invariant violations.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl EngineError {
    /// Message suitable for surfacing to an end client.
    ///
    /// Upstream response bodies can carry provider detail that does not
    /// belong in a client-facing event, so `ApiError` is reduced to its
    /// status code here.
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError { code, .. } => format!("upstream API error (status {code})"),
            Self::ConfigurationError(_) => "service is misconfigured".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_user_message_hides_body() {
        let err = EngineError::ApiError {
            code: 502,
            message: "raw provider body with internal detail".to_string(),
        };
        let msg = err.user_message();
        assert!(msg.contains("502"));
        assert!(!msg.contains("internal detail"));
    }

    #[test]
    fn stream_error_user_message_passes_through() {
        let err = EngineError::StreamError("connection reset".to_string());
        assert!(err.user_message().contains("connection reset"));
    }
}
