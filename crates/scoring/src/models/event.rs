use serde::{Deserialize, Serialize};

use super::class::Class;
use super::race::{Race, ScoringSystem};

/// Discard configuration for series scoring.
///
/// `races_before_discards == 0` disables discards entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardPolicy {
    #[serde(default)]
    pub races_before_discards: u32,
    #[serde(default)]
    pub number_of_discards: u32,
}

impl DiscardPolicy {
    pub fn new(races_before_discards: u32, number_of_discards: u32) -> Self {
        Self {
            races_before_discards,
            number_of_discards,
        }
    }

    /// Number of races dropped from a series of `races_sailed` races.
    ///
    /// Never drops every race: at least one score always counts.
    pub fn discards_for(&self, races_sailed: usize) -> usize {
        let threshold = self.races_before_discards as usize;
        if threshold == 0 || self.number_of_discards == 0 || races_sailed <= threshold {
            return 0;
        }
        (self.number_of_discards as usize).min(races_sailed.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub races: Vec<Race>,

    // Access control, owned by the hosting application.
    #[serde(default)]
    pub team_members: Vec<String>,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
    #[serde(default)]
    pub allowed_users: Vec<String>,

    #[serde(default)]
    pub default_scoring_system: ScoringSystem,
    #[serde(default = "default_is_public")]
    pub include_overall_by_default: bool,
    #[serde(default)]
    pub default_classes: Vec<Class>,

    #[serde(flatten)]
    pub discards: DiscardPolicy,
}

fn default_is_public() -> bool {
    true
}

impl Event {
    pub fn race(&self, race_id: &str) -> Option<&Race> {
        self.races.iter().find(|r| r.id == race_id)
    }

    pub fn has_race(&self, race_id: &str) -> bool {
        self.races.iter().any(|r| r.id == race_id)
    }
}
