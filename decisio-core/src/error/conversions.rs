//! Type conversions for `EngineError`.
//!
//! `From` implementations for the error types the engine's callers meet
//! at its boundaries.

use super::types::EngineError;

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
