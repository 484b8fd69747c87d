//! Outbound event vocabulary.

use serde_json::{Value, json};

/// One outbound event produced by the translator.
///
/// Each variant maps to exactly one SSE frame on the wire via [`name`] and
/// [`payload`]; the encoder never needs to know the variant semantics.
///
/// [`name`]: DecisionEvent::name
/// [`payload`]: DecisionEvent::payload
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionEvent {
    /// Progress note for the client.
    Status { message: String },
    /// One fully normalized decision option.
    Option { option: Value },
    /// Model recommendation, passed through as the full raw object.
    Recommendation { data: Value },
    AuditRecommendation { text: String },
    AuditConfidence { value: f64 },
    AuditKeyFactors { items: Vec<String> },
    AuditAssumptions { items: Vec<String> },
    AuditReversalTriggers { items: Vec<String> },
    /// Terminal event. `success` is false for error and safety-net ends.
    Done { success: bool },
    /// In-band failure report, always followed by `Done { success: false }`.
    Error { message: String },
    /// Pass-through for object kinds the translator does not recognize.
    Custom { event_type: String, data: Value },
}

impl DecisionEvent {
    /// SSE event name on the wire.
    pub fn name(&self) -> &str {
        match self {
            Self::Status { .. } => "status",
            Self::Option { .. } => "option",
            Self::Recommendation { .. } => "recommendation",
            Self::AuditRecommendation { .. } => "audit:recommendation",
            Self::AuditConfidence { .. } => "audit:confidence",
            Self::AuditKeyFactors { .. } => "audit:key_factors",
            Self::AuditAssumptions { .. } => "audit:assumptions",
            Self::AuditReversalTriggers { .. } => "audit:reversal_triggers",
            Self::Done { .. } => "done",
            Self::Error { .. } => "error",
            Self::Custom { event_type, .. } => event_type,
        }
    }

    /// JSON payload carried on the SSE `data:` line.
    pub fn payload(&self) -> Value {
        match self {
            Self::Status { message } => json!({ "message": message }),
            Self::Option { option } => option.clone(),
            Self::Recommendation { data } => data.clone(),
            Self::AuditRecommendation { text } => Value::String(text.clone()),
            Self::AuditConfidence { value } => json!(value),
            Self::AuditKeyFactors { items } => json!(items),
            Self::AuditAssumptions { items } => json!(items),
            Self::AuditReversalTriggers { items } => json!(items),
            Self::Done { success } => Value::Bool(*success),
            Self::Error { message } => json!({ "message": message }),
            Self::Custom { data, .. } => data.clone(),
        }
    }

    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}
