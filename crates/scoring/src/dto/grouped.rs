use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{HandicapSystem, RaceResult};

/// Results of one class within a handicap group, ordered by position.
#[derive(Debug, Clone, Serialize)]
pub struct ClassGroup {
    pub class_id: String,
    pub class_name: String,
    /// `None` for one-design results and for classes the race does not define.
    pub rating: Option<Decimal>,
    pub results: Vec<RaceResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HandicapGroup {
    pub handicap_system: HandicapSystem,
    pub classes: Vec<ClassGroup>,
}

/// An event's results grouped by handicap system, then by class.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedResults {
    pub groups: Vec<HandicapGroup>,
}

impl GroupedResults {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn result_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.classes)
            .map(|c| c.results.len())
            .sum()
    }
}
