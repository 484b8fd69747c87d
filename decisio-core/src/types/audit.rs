//! Final decision audit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The auditable summary the model must emit as its final object.
///
/// At most one is produced per request, and its arrival terminates the
/// stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionAudit {
    #[serde(default, alias = "final_recommendation")]
    pub recommendation: String,
    /// Always within [0.0, 1.0] after extraction.
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub key_factors: Vec<String>,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub reversal_triggers: Vec<String>,
}

impl DecisionAudit {
    /// Lenient extraction from a raw model object.
    ///
    /// Accepts the legacy `final_recommendation` field name, substitutes
    /// defaults for absent or mistyped fields, and clamps `confidence`
    /// into [0.0, 1.0]. Never fails: a degenerate audit object still
    /// terminates the stream with a well-formed fan-out.
    pub fn from_value(object: &Value) -> Self {
        let recommendation = object
            .get("recommendation")
            .or_else(|| object.get("final_recommendation"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let confidence = object
            .get("confidence")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
            .clamp(0.0, 1.0);
        Self {
            recommendation,
            confidence,
            key_factors: string_items(object.get("key_factors")),
            assumptions: string_items(object.get("assumptions")),
            reversal_triggers: string_items(object.get("reversal_triggers")),
        }
    }
}

fn string_items(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
