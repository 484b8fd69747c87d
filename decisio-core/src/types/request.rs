//! Inbound request model.

use serde::Deserialize;

/// One decision evaluation request.
///
/// Deserialized once per inbound HTTP request and owned by the stream
/// orchestrator for the request's lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionRequest {
    /// The decision to analyze. Must be non-empty; the route rejects
    /// whitespace-only text before any streaming starts.
    pub decision_text: String,

    /// Hard constraints the options must respect.
    #[serde(default)]
    pub constraints: Vec<String>,

    /// Free-form caller context. Accepted and carried, not interpreted.
    #[serde(default)]
    pub context: serde_json::Map<String, serde_json::Value>,
}
