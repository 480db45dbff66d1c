use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::submission::{BulkReport, ResultEdit, ResultSubmission};
use crate::error::{Result, ScoringError};
use crate::models::{ElapsedTime, Event, GroupKey, PenaltyCode, Race, RaceResult};
use crate::services::corrected_time::correct_for_race;
use crate::services::points::assign_points;
use crate::services::positions::{positions_are_consistent, recompute_positions};

/// The results collection handed over by the hosting application, kept in
/// submission order. Every change re-ranks the affected (race, class) group
/// and re-scores the affected race before returning.
#[derive(Debug, Clone, Default)]
pub struct ResultLedger {
    results: Vec<RaceResult>,
}

impl ResultLedger {
    pub fn new(results: Vec<RaceResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[RaceResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<RaceResult> {
        self.results
    }

    pub fn get(&self, id: &str) -> Option<&RaceResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// Arena index: positions in `results()` for every (race, class) group.
    pub fn groups(&self) -> BTreeMap<GroupKey, Vec<usize>> {
        let mut groups: BTreeMap<GroupKey, Vec<usize>> = BTreeMap::new();
        for (idx, result) in self.results.iter().enumerate() {
            groups.entry(result.group_key()).or_default().push(idx);
        }
        groups
    }

    /// Adds one result and returns its id.
    pub fn submit(
        &mut self,
        event: &Event,
        submission: ResultSubmission,
        submitted_by: &str,
    ) -> Result<String> {
        let result = build_result(event, submission, None, submitted_by)?;
        let id = result.id.clone();
        let key = result.group_key();
        self.results.push(result);

        info!("Created result {} for race {}", id, key.race_id);
        self.rescore_after_change(event, &key);
        Ok(id)
    }

    /// Adds every valid entry; invalid entries are reported, not fatal.
    ///
    /// `race_override` replaces each entry's race id when given.
    pub fn submit_bulk(
        &mut self,
        event: &Event,
        race_override: Option<&str>,
        entries: Vec<ResultSubmission>,
        submitted_by: &str,
    ) -> BulkReport {
        let mut report = BulkReport::default();
        let mut touched: Vec<GroupKey> = Vec::new();

        for entry in entries {
            let sailor = entry.sailor_name.clone();
            match build_result(event, entry, race_override, submitted_by) {
                Ok(result) => {
                    let key = result.group_key();
                    if !touched.contains(&key) {
                        touched.push(key);
                    }
                    report.accepted.push(result.id.clone());
                    self.results.push(result);
                }
                Err(e) => {
                    warn!("Rejected bulk entry for '{}': {}", sailor, e);
                    report.errors.push(format!("Error processing result for {}: {}", sailor, e));
                }
            }
        }

        for key in &touched {
            self.recompute_group(key);
        }
        let mut races: Vec<&str> = touched.iter().map(|k| k.race_id.as_str()).collect();
        races.sort_unstable();
        races.dedup();
        for race in races.iter().filter_map(|id| event.race(id)) {
            self.score_race(race);
        }

        info!(
            "Bulk submission for event {}: {} accepted, {} rejected",
            event.id,
            report.accepted.len(),
            report.errors.len()
        );
        report
    }

    /// Replaces sailor identity, times, status and handicap of a result.
    pub fn edit(
        &mut self,
        event: &Event,
        id: &str,
        edit: ResultEdit,
        amended_by: &str,
    ) -> Result<()> {
        let idx = self.index_of(id)?;
        let race = event
            .race(&self.results[idx].race_id)
            .ok_or_else(|| ScoringError::RaceNotFound(self.results[idx].race_id.clone()))?;

        edit.validate()?;
        let finish_time = parse_finish_time(edit.finish_time.as_deref())?;
        let corrected = correct_entry(race, finish_time, edit.status, edit.handicap_number)?;

        let result = &mut self.results[idx];
        result.sailor_name = edit.sailor_name;
        result.sail_number = edit.sail_number;
        result.finish_time = finish_time;
        result.status = edit.status;
        result.handicap_number = edit.handicap_number;
        result.corrected_time = corrected;
        result.amended_by = Some(amended_by.to_string());
        result.amended_at = Some(Utc::now());

        let key = result.group_key();
        info!("Amended result {} in race {}", id, key.race_id);
        self.rescore_after_change(event, &key);
        Ok(())
    }

    /// Removes a result and returns it.
    pub fn delete(&mut self, event: &Event, id: &str) -> Result<RaceResult> {
        let idx = self.index_of(id)?;
        if !event.has_race(&self.results[idx].race_id) {
            return Err(ScoringError::RaceNotFound(self.results[idx].race_id.clone()));
        }

        let removed = self.results.remove(idx);
        info!("Deleted result {} from race {}", id, removed.race_id);
        self.rescore_after_change(event, &removed.group_key());
        Ok(removed)
    }

    /// Re-ranks every group of `race` and re-scores it.
    pub fn rescore_race(&mut self, race: &Race) {
        let keys: Vec<GroupKey> = self
            .groups()
            .into_keys()
            .filter(|k| k.race_id == race.id)
            .collect();
        for key in &keys {
            self.recompute_group(key);
        }
        self.score_race(race);
    }

    pub fn rescore_event(&mut self, event: &Event) {
        for race in &event.races {
            self.rescore_race(race);
        }
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.results
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ScoringError::ResultNotFound(id.to_string()))
    }

    fn rescore_after_change(&mut self, event: &Event, key: &GroupKey) {
        self.recompute_group(key);
        if let Some(race) = event.race(&key.race_id) {
            self.score_race(race);
        }
    }

    fn recompute_group(&mut self, key: &GroupKey) {
        let size = recompute_positions(self.results.iter_mut().filter(|r| r.in_group(key)));
        debug_assert!(positions_are_consistent(
            self.results.iter().filter(|r| r.in_group(key))
        ));
        debug!(
            "Recomputed {} position(s) for race {} class '{}'",
            size, key.race_id, key.class_id
        );
    }

    fn score_race(&mut self, race: &Race) {
        assign_points(race, self.results.iter_mut().filter(|r| r.race_id == race.id));
    }
}

fn build_result(
    event: &Event,
    submission: ResultSubmission,
    race_override: Option<&str>,
    submitted_by: &str,
) -> Result<RaceResult> {
    submission.validate()?;

    let race_id = race_override
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| submission.race_id.trim());
    let race = event
        .race(race_id)
        .ok_or_else(|| ScoringError::RaceNotFound(race_id.to_string()))?;

    let class_ref = submission.class_id.trim();
    let class_id = if class_ref.is_empty() {
        String::new()
    } else {
        race.resolve_class(class_ref)
            .map(|c| c.id.clone())
            .ok_or_else(|| ScoringError::ClassNotFound {
                race_id: race.id.clone(),
                class: class_ref.to_string(),
            })?
    };

    let finish_time = parse_finish_time(submission.finish_time.as_deref())?;
    let corrected = correct_entry(
        race,
        finish_time,
        submission.status,
        submission.handicap_number,
    )?;

    Ok(RaceResult {
        id: Uuid::new_v4().to_string(),
        race_id: race.id.clone(),
        class_id,
        sailor_name: submission.sailor_name,
        sail_number: submission.sail_number,
        finish_time,
        corrected_time: corrected,
        position: 0,
        status: submission.status,
        points: 0,
        handicap_number: submission.handicap_number,
        uploaded_by: Some(submitted_by.to_string()),
        uploaded_at: Some(Utc::now()),
        amended_by: None,
        amended_at: None,
    })
}

fn parse_finish_time(raw: Option<&str>) -> Result<Option<ElapsedTime>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some),
    }
}

/// Checks the finish/status/handicap combination and returns the corrected
/// time for it.
fn correct_entry(
    race: &Race,
    finish_time: Option<ElapsedTime>,
    status: Option<PenaltyCode>,
    handicap_number: Option<Decimal>,
) -> Result<Option<Decimal>> {
    if finish_time.is_none() && status.is_none() {
        return Err(ScoringError::MissingFinish);
    }
    if let Some(handicap) = handicap_number.filter(|h| *h <= Decimal::ZERO) {
        return Err(ScoringError::InvalidRating(handicap));
    }
    correct_for_race(race, finish_time, handicap_number)
}
