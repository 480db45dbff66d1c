use rust_decimal::Decimal;
use scoring::ScoringError;
use scoring::dto::ResultSubmission;
use scoring::models::{Event, HandicapSystem, PenaltyCode, Race};

use crate::error::Result;

/// Sample bulk-submission entries: a finisher and a DNS for every race of
/// `event`, or only for `race_id` when given. Single-race templates leave
/// the race id out since the upload names the race.
pub fn submission_template(event: &Event, race_id: Option<&str>) -> Result<Vec<ResultSubmission>> {
    match race_id {
        Some(id) => {
            let race = event
                .race(id)
                .ok_or_else(|| ScoringError::RaceNotFound(id.to_string()))?;
            Ok(race_samples(race, false))
        }
        None => Ok(event.races.iter().flat_map(|r| race_samples(r, true)).collect()),
    }
}

fn race_samples(race: &Race, with_race_id: bool) -> Vec<ResultSubmission> {
    let first_class = race.classes.first();
    let class_id = first_class.map(|c| c.name.clone()).unwrap_or_default();
    let handicap_number = (!race.is_one_design()).then(|| {
        first_class.map_or_else(|| neutral_rating(&race.handicap_system), |c| c.rating)
    });
    let race_id = if with_race_id { race.id.clone() } else { String::new() };

    vec![
        ResultSubmission {
            race_id: race_id.clone(),
            class_id: class_id.clone(),
            sailor_name: "John Doe".to_string(),
            sail_number: "ABC123".to_string(),
            finish_time: Some("00:45:30".to_string()),
            status: None,
            handicap_number,
        },
        ResultSubmission {
            race_id,
            class_id,
            sailor_name: "Jane Smith".to_string(),
            sail_number: "DEF456".to_string(),
            finish_time: None,
            status: Some(PenaltyCode::Dns),
            handicap_number,
        },
    ]
}

/// Rating that leaves the elapsed time unchanged.
fn neutral_rating(system: &HandicapSystem) -> Decimal {
    match system {
        HandicapSystem::Portsmouth => Decimal::from(1_000),
        HandicapSystem::Irc | HandicapSystem::Ytc | HandicapSystem::Other(_) => Decimal::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring::ResultLedger;
    use scoring::models::{DiscardPolicy, HandicapType, ScoringSystem};

    fn open_race(id: &str, system: HandicapSystem) -> Race {
        Race {
            id: id.to_string(),
            name: id.to_uppercase(),
            handicap_type: HandicapType::Open,
            handicap_system: system,
            scoring_system: ScoringSystem::LowPoint,
            is_medal_race: false,
            include_overall: true,
            classes: Vec::new(),
        }
    }

    fn event(races: Vec<Race>) -> Event {
        Event {
            id: "e1".to_string(),
            name: "Evening Series".to_string(),
            races,
            team_members: Vec::new(),
            is_public: true,
            allowed_users: Vec::new(),
            default_scoring_system: ScoringSystem::LowPoint,
            include_overall_by_default: true,
            default_classes: Vec::new(),
            discards: DiscardPolicy::default(),
        }
    }

    #[test]
    fn test_open_race_without_classes_gets_neutral_rating() {
        let event = event(vec![
            open_race("r1", HandicapSystem::Portsmouth),
            open_race("r2", HandicapSystem::Irc),
        ]);

        let samples = submission_template(&event, None).unwrap();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0].class_id, "");
        assert_eq!(samples[0].handicap_number, Some(Decimal::from(1_000)));
        assert_eq!(samples[2].handicap_number, Some(Decimal::ONE));

        let mut ledger = ResultLedger::default();
        let report = ledger.submit_bulk(&event, None, samples, "o");
        assert!(report.is_clean(), "{:?}", report.errors);

        let john = ledger
            .results()
            .iter()
            .find(|r| r.race_id == "r1" && r.sailor_name == "John Doe")
            .unwrap();
        assert_eq!(john.corrected_time, Some(Decimal::from(2_730)));
    }

    #[test]
    fn test_single_race_template_omits_race_id() {
        let event = event(vec![open_race("r1", HandicapSystem::Ytc)]);

        let samples = submission_template(&event, Some("r1")).unwrap();
        assert_eq!(samples.len(), 2);
        assert!(samples.iter().all(|s| s.race_id.is_empty()));
        assert_eq!(samples[1].status, Some(PenaltyCode::Dns));
        assert!(submission_template(&event, Some("r9")).is_err());
    }
}
