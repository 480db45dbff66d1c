use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::elapsed::ElapsedTime;
use super::status::PenaltyCode;

/// Identifies the (race, class) group whose positions are ranked together.
/// An empty `class_id` is the one-design group of a race.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub race_id: String,
    pub class_id: String,
}

impl GroupKey {
    pub fn new(race_id: impl Into<String>, class_id: impl Into<String>) -> Self {
        Self {
            race_id: race_id.into(),
            class_id: class_id.into(),
        }
    }
}

/// One boat's result in one race.
///
/// `corrected_time`, `position` and `points` are derived by the engine.
/// A result without a corrected time (no finish time) ranks behind every
/// timed result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceResult {
    pub id: String,
    pub race_id: String,
    #[serde(default)]
    pub class_id: String,
    pub sailor_name: String,
    #[serde(default)]
    pub sail_number: String,
    #[serde(default)]
    pub finish_time: Option<ElapsedTime>,
    #[serde(default)]
    pub corrected_time: Option<Decimal>,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub status: Option<PenaltyCode>,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub handicap_number: Option<Decimal>,

    // Audit trail, owned by the hosting application.
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub amended_by: Option<String>,
    #[serde(default)]
    pub amended_at: Option<DateTime<Utc>>,
}

impl RaceResult {
    pub fn is_finisher(&self) -> bool {
        self.status.is_none()
    }

    pub fn is_one_design(&self) -> bool {
        self.class_id.is_empty()
    }

    pub fn group_key(&self) -> GroupKey {
        GroupKey::new(self.race_id.clone(), self.class_id.clone())
    }

    pub fn in_group(&self, key: &GroupKey) -> bool {
        self.race_id == key.race_id && self.class_id == key.class_id
    }
}

/// Orders corrected times ascending with missing times last.
pub fn cmp_corrected(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_corrected_time_sorts_last() {
        let mut times = vec![None, Some(Decimal::from(30)), None, Some(Decimal::from(10))];
        times.sort_by(|a, b| cmp_corrected(*a, *b));
        assert_eq!(times, vec![Some(Decimal::from(10)), Some(Decimal::from(30)), None, None]);
    }

    #[test]
    fn test_deserialize_minimal_result() {
        let json = r#"{
            "id": "x1",
            "race_id": "r1",
            "sailor_name": "Ann Lee",
            "finish_time": "00:45:30",
            "status": null
        }"#;
        let result: RaceResult = serde_json::from_str(json).unwrap();
        assert!(result.is_finisher());
        assert!(result.is_one_design());
        assert_eq!(result.finish_time, Some(ElapsedTime::from_hms(0, 45, 30)));
        assert_eq!(result.group_key(), GroupKey::new("r1", ""));
    }

    #[test]
    fn test_multi_day_result_survives_save_and_reload() {
        let json = r#"[{"id":"x","race_id":"r","sailor_name":"A","finish_time":"1.01:00:00"}]"#;
        let results: Vec<RaceResult> = serde_json::from_str(json).unwrap();
        assert_eq!(results[0].finish_time, Some(ElapsedTime::from_hms(25, 0, 0)));

        let saved = serde_json::to_string(&results).unwrap();
        let reloaded: Vec<RaceResult> = serde_json::from_str(&saved).unwrap();
        assert_eq!(reloaded[0].finish_time, results[0].finish_time);
    }

    #[test]
    fn test_status_code_round_trip() {
        let json = r#"{"id":"x","race_id":"r","sailor_name":"A","status":"DNF"}"#;
        let result: RaceResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.status, Some(PenaltyCode::Dnf));
        assert!(!result.is_finisher());
    }
}
