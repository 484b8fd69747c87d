//! decisio-core
//!
//! Incremental JSON extraction and event translation for decision streams.
//!
//! The engine consumes an arbitrarily chunked stream of token deltas from a
//! language model, detects complete JSON object boundaries, normalizes each
//! object against the decision schema, and emits the typed outbound event
//! sequence that the server re-streams to clients as Server-Sent Events.
#![deny(unsafe_code)]

pub mod error;
pub mod streaming;
pub mod types;

pub use error::EngineError;
