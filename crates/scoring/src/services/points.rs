use tracing::debug;

use crate::models::{Race, RaceResult, ScoringSystem, cmp_corrected};

/// Points for the finisher ranked `rank` (1-based) among `finishers`.
pub fn finisher_points(
    rank: u32,
    finishers: u32,
    scoring: ScoringSystem,
    is_medal_race: bool,
) -> u32 {
    let base = match scoring {
        ScoringSystem::LowPoint => rank,
        ScoringSystem::HighPoint => finishers.saturating_sub(rank) + 1,
    };
    if is_medal_race { base * 2 } else { base }
}

/// Assigns points to every result of one race.
///
/// Finishers are ranked across the whole race by corrected time; results
/// with a status code get the fixed penalty for their code, scaled by the
/// number of boats in the race. Only `points` is written.
pub fn assign_points<'a>(race: &Race, results: impl IntoIterator<Item = &'a mut RaceResult>) {
    let entries: Vec<&mut RaceResult> = results.into_iter().collect();
    if entries.is_empty() {
        return;
    }
    debug_assert!(
        entries.iter().all(|r| r.race_id == race.id),
        "assign_points called with results from another race"
    );

    let boats_in_race = entries.len() as u32;
    let (mut finishers, non_finishers): (Vec<_>, Vec<_>) =
        entries.into_iter().partition(|r| r.is_finisher());

    finishers.sort_by(|a, b| cmp_corrected(a.corrected_time, b.corrected_time));
    let finisher_count = finishers.len() as u32;

    for (idx, result) in finishers.into_iter().enumerate() {
        result.points = finisher_points(
            idx as u32 + 1,
            finisher_count,
            race.scoring_system,
            race.is_medal_race,
        );
    }

    for result in non_finishers {
        if let Some(code) = result.status {
            result.points = code.penalty_points(race.scoring_system, boats_in_race);
        }
    }

    debug!(
        "Scored race {}: {} finisher(s) of {} boat(s)",
        race.id, finisher_count, boats_in_race
    );
}
