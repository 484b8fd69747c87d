//! Classification of parsed model objects into outbound events.

use serde_json::Value;

use crate::streaming::enforce_option_shape;
use crate::types::{DecisionAudit, DecisionEvent};

/// Translates parsed model objects into the outbound event sequence.
///
/// Stateful per request: once the terminal audit fan-out has been emitted,
/// the translator is finished and ignores further input. That keeps the
/// stream invariant that nothing follows the `done` event and that at most
/// one audit is ever translated.
#[derive(Debug, Default)]
pub struct ObjectTranslator {
    finished: bool,
}

impl ObjectTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the terminal audit fan-out has been emitted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Translate one parsed object into zero or more outbound events.
    pub fn translate(&mut self, object: Value) -> Vec<DecisionEvent> {
        if self.finished {
            tracing::debug!("object received after terminal audit; ignored");
            return Vec::new();
        }

        let kind = object
            .get("type")
            .or_else(|| object.get("event"))
            .and_then(Value::as_str)
            .unwrap_or_default();

        match kind {
            "status" => {
                let message = object
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                vec![DecisionEvent::Status { message }]
            }
            "option" => vec![DecisionEvent::Option {
                option: enforce_option_shape(object),
            }],
            "recommendation" => vec![DecisionEvent::Recommendation { data: object }],
            "decision_audit" => {
                self.finished = true;
                let audit = DecisionAudit::from_value(&object);
                vec![
                    DecisionEvent::AuditRecommendation {
                        text: audit.recommendation,
                    },
                    DecisionEvent::AuditConfidence {
                        value: audit.confidence,
                    },
                    DecisionEvent::AuditKeyFactors {
                        items: audit.key_factors,
                    },
                    DecisionEvent::AuditAssumptions {
                        items: audit.assumptions,
                    },
                    DecisionEvent::AuditReversalTriggers {
                        items: audit.reversal_triggers,
                    },
                    DecisionEvent::Done { success: true },
                ]
            }
            _ => {
                // Unrecognized kinds pass through best-effort. The wire
                // name prefers an explicit `event` field over `type`.
                let event_type = object
                    .get("event")
                    .or_else(|| object.get("type"))
                    .and_then(Value::as_str)
                    .unwrap_or("message")
                    .to_string();
                vec![DecisionEvent::Custom {
                    event_type,
                    data: object,
                }]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_message_defaults_to_empty() {
        let mut translator = ObjectTranslator::new();
        let events = translator.translate(json!({ "type": "status" }));
        assert_eq!(
            events,
            vec![DecisionEvent::Status {
                message: String::new()
            }]
        );
    }

    #[test]
    fn options_are_shape_enforced() {
        let mut translator = ObjectTranslator::new();
        let events = translator.translate(json!({
            "type": "option",
            "title": "relocate",
        }));
        assert_eq!(events.len(), 1);
        let DecisionEvent::Option { option } = &events[0] else {
            panic!("expected option event");
        };
        assert_eq!(option["risk"], "medium");
        assert_eq!(option["dimensions"]["UPSIDE"], 0.5);
    }

    #[test]
    fn recommendation_passes_the_full_object_through() {
        // The two historical pipeline versions disagreed here (full object
        // vs. an extracted data field); the full object is the contract.
        let mut translator = ObjectTranslator::new();
        let object = json!({
            "type": "recommendation",
            "option_id": "opt-1",
            "reasoning": "best tradeoff",
        });
        let events = translator.translate(object.clone());
        assert_eq!(
            events,
            vec![DecisionEvent::Recommendation { data: object }]
        );
    }

    #[test]
    fn audit_fans_out_in_fixed_order_and_finishes() {
        let mut translator = ObjectTranslator::new();
        let events = translator.translate(json!({
            "type": "decision_audit",
            "recommendation": "go",
            "confidence": 0.9,
            "key_factors": ["a"],
            "assumptions": ["b"],
            "reversal_triggers": ["c"],
        }));
        let names: Vec<&str> = events.iter().map(DecisionEvent::name).collect();
        assert_eq!(
            names,
            vec![
                "audit:recommendation",
                "audit:confidence",
                "audit:key_factors",
                "audit:assumptions",
                "audit:reversal_triggers",
                "done",
            ]
        );
        assert!(translator.is_finished());
        assert_eq!(events.last(), Some(&DecisionEvent::Done { success: true }));
    }

    #[test]
    fn nothing_translates_after_the_audit() {
        let mut translator = ObjectTranslator::new();
        translator.translate(json!({ "type": "decision_audit" }));
        assert!(
            translator
                .translate(json!({ "type": "option", "title": "late" }))
                .is_empty()
        );
        assert!(
            translator
                .translate(json!({ "type": "decision_audit" }))
                .is_empty()
        );
    }

    #[test]
    fn unknown_kinds_pass_through_with_their_own_name() {
        let mut translator = ObjectTranslator::new();
        let events = translator.translate(json!({ "type": "insight", "text": "hm" }));
        assert_eq!(events[0].name(), "insight");

        let events = translator.translate(json!({ "event": "note", "type": "aside" }));
        assert_eq!(events[0].name(), "note");

        let events = translator.translate(json!({ "text": "nameless" }));
        assert_eq!(events[0].name(), "message");
        assert_eq!(events[0].payload(), json!({ "text": "nameless" }));
    }
}
