use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label shown for results that carry no class (one-design racing).
pub const ONE_DESIGN_LABEL: &str = "One Design";

/// Label shown when a result references a class its race does not define.
pub const UNKNOWN_CLASS_LABEL: &str = "Unknown Class";

/// A boat class entered in a race, with its handicap rating.
///
/// The rating's unit depends on the race's handicap system: a Portsmouth
/// yardstick number (e.g. 1100) or a time-correction factor (e.g. 0.985).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub scoring_method: String,
    #[serde(default = "default_rating")]
    pub rating: Decimal,
}

fn default_rating() -> Decimal {
    Decimal::ONE
}

impl Class {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rating: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scoring_method: String::new(),
            rating,
        }
    }
}
