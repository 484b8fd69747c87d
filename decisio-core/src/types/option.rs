//! Option schema: dimension scores and the normalized option shape.

use serde::{Deserialize, Serialize};

/// The six dimension names every normalized option carries, in canonical
/// order.
pub const DIMENSION_NAMES: [&str; 6] = [
    "UPSIDE",
    "STABILITY",
    "FLEXIBILITY",
    "LEARNING_VALUE",
    "EFFORT",
    "EMOTIONAL_COST",
];

/// Substituted for any missing or non-numeric dimension score.
pub const DIMENSION_DEFAULT: f64 = 0.5;

/// Structured dimension scores for one option.
///
/// Total by construction: the normalizer guarantees every field is present
/// and clamped to [0.0, 1.0] before this shape is ever produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct OptionDimensions {
    pub upside: f64,
    pub stability: f64,
    pub flexibility: f64,
    pub learning_value: f64,
    pub effort: f64,
    pub emotional_cost: f64,
}

impl Default for OptionDimensions {
    fn default() -> Self {
        Self {
            upside: DIMENSION_DEFAULT,
            stability: DIMENSION_DEFAULT,
            flexibility: DIMENSION_DEFAULT,
            learning_value: DIMENSION_DEFAULT,
            effort: DIMENSION_DEFAULT,
            emotional_cost: DIMENSION_DEFAULT,
        }
    }
}

/// One fully normalized decision option as delivered to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    /// Stable identifier; empty string when the model omitted it, never null.
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default = "default_risk")]
    pub risk: String,
    pub dimensions: OptionDimensions,
}

fn default_risk() -> String {
    "medium".to_string()
}
