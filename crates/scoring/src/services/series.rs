use std::collections::HashMap;

use crate::dto::standings::{ClassStandings, RaceScore, Standing};
use crate::models::{DiscardPolicy, Event, RaceResult};
use crate::services::grouping::class_label;

/// Indices of the races dropped from `points`, worst (highest) first.
/// Equal scores drop the earlier race.
pub fn discarded_indices(points: &[u32], policy: DiscardPolicy) -> Vec<usize> {
    let discards = policy.discards_for(points.len());
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| points[b].cmp(&points[a]));
    order.truncate(discards);
    order
}

/// Series total for one sailor after applying discards.
pub fn series_total(points: &[u32], policy: DiscardPolicy) -> u32 {
    let dropped = discarded_indices(points, policy);
    points
        .iter()
        .enumerate()
        .filter(|(idx, _)| !dropped.contains(idx))
        .map(|(_, p)| *p)
        .sum()
}

/// Net totals per sailor, lowest first. Sailors on equal totals keep the
/// order they were given in.
pub fn standings(per_sailor: &[(String, Vec<u32>)], policy: DiscardPolicy) -> Vec<(String, u32)> {
    let mut totals: Vec<(String, u32)> = per_sailor
        .iter()
        .map(|(sailor, points)| (sailor.clone(), series_total(points, policy)))
        .collect();
    totals.sort_by_key(|(_, total)| *total);
    totals
}

/// Series standings over every race of `event`.
///
/// Results are matched to sailors by name. Races are taken in event order,
/// so a sailor's breakdown follows the race schedule.
pub fn overall_standings(event: &Event, results: &[RaceResult]) -> Vec<Standing> {
    let mut sailors = SailorScores::default();
    for race in &event.races {
        for result in results.iter().filter(|r| r.race_id == race.id) {
            sailors.push(&result.sailor_name, race.id.as_str(), race.name.as_str(), result.points);
        }
    }
    rank(sailors.into_inner(), event.discards)
}

/// Series standings computed separately for each class of `event`, in the
/// order classes are first met.
pub fn class_standings(event: &Event, results: &[RaceResult]) -> Vec<ClassStandings> {
    let mut classes: Vec<(String, SailorScores)> = Vec::new();
    for race in &event.races {
        for result in results.iter().filter(|r| r.race_id == race.id) {
            let label = class_label(race, &result.class_id);
            let idx = match classes.iter().position(|(name, _)| *name == label) {
                Some(idx) => idx,
                None => {
                    classes.push((label, SailorScores::default()));
                    classes.len() - 1
                }
            };
            classes[idx]
                .1
                .push(&result.sailor_name, race.id.as_str(), race.name.as_str(), result.points);
        }
    }

    classes
        .into_iter()
        .map(|(class_name, sailors)| ClassStandings {
            class_name,
            standings: rank(sailors.into_inner(), event.discards),
        })
        .collect()
}

fn rank(sailors: Vec<(String, Vec<RaceScore>)>, policy: DiscardPolicy) -> Vec<Standing> {
    let mut standings: Vec<Standing> = sailors
        .into_iter()
        .map(|(sailor_name, mut races)| {
            let points: Vec<u32> = races.iter().map(|r| r.points).collect();
            for idx in discarded_indices(&points, policy) {
                races[idx].discarded = true;
            }
            Standing {
                rank: 0,
                sailor_name,
                net_points: races.iter().filter(|r| !r.discarded).map(|r| r.points).sum(),
                gross_points: points.iter().sum(),
                races,
            }
        })
        .collect();

    standings.sort_by_key(|s| s.net_points);
    for (idx, standing) in standings.iter_mut().enumerate() {
        standing.rank = idx as u32 + 1;
    }
    standings
}

/// Per-sailor race scores in first-seen order.
#[derive(Default)]
struct SailorScores {
    order: Vec<(String, Vec<RaceScore>)>,
    index: HashMap<String, usize>,
}

impl SailorScores {
    fn push(&mut self, sailor: &str, race_id: &str, race_name: &str, points: u32) {
        let idx = match self.index.get(sailor) {
            Some(&idx) => idx,
            None => {
                self.order.push((sailor.to_string(), Vec::new()));
                self.index.insert(sailor.to_string(), self.order.len() - 1);
                self.order.len() - 1
            }
        };
        self.order[idx].1.push(RaceScore {
            race_id: race_id.to_string(),
            race_name: race_name.to_string(),
            points,
            discarded: false,
        });
    }

    fn into_inner(self) -> Vec<(String, Vec<RaceScore>)> {
        self.order
    }
}
