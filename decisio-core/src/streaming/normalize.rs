//! Dimension normalization and option shape enforcement.

use serde_json::{Map, Value, json};

use crate::types::{DIMENSION_DEFAULT, DIMENSION_NAMES};

/// Total normalization of an option's `dimensions` mapping.
///
/// Whatever the model produced - a missing mapping, wrong types, extra
/// keys, out-of-range values - the result carries exactly the six known
/// dimensions, each a float in [0.0, 1.0]. This function never fails.
pub fn normalize_dimensions(dimensions: Option<&Value>) -> Map<String, Value> {
    let source = dimensions.and_then(Value::as_object);
    let mut normalized = Map::with_capacity(DIMENSION_NAMES.len());
    for name in DIMENSION_NAMES {
        let value = source
            .and_then(|m| m.get(name))
            .and_then(coerce_f64)
            .unwrap_or(DIMENSION_DEFAULT);
        normalized.insert(name.to_string(), json!(value.clamp(0.0, 1.0)));
    }
    normalized
}

/// Numeric coercion for dimension scores.
///
/// The model occasionally quotes scores or emits booleans; both coerce the
/// way a loose numeric cast would.
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Guarantee the canonical option shape on a raw model object.
///
/// `dimensions` is replaced wholesale with its normalized form. The other
/// optional fields (`id`, `description`, `pros`, `cons`, `risk`) are
/// filled only when absent - present values pass through untouched, even
/// malformed ones, so applying this twice changes nothing.
pub fn enforce_option_shape(mut option: Value) -> Value {
    let Some(obj) = option.as_object_mut() else {
        return option;
    };

    let normalized = normalize_dimensions(obj.get("dimensions"));
    obj.insert("dimensions".to_string(), Value::Object(normalized));

    for (key, default) in [
        ("id", json!("")),
        ("description", json!("")),
        ("pros", json!([])),
        ("cons", json!([])),
        ("risk", json!("medium")),
    ] {
        obj.entry(key).or_insert(default);
    }

    option
}
