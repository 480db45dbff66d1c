use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Result, ScoringError};
use crate::models::{ElapsedTime, HandicapSystem, Race};

/// Corrects an elapsed time for a boat's handicap rating.
///
/// - Portsmouth: `elapsed_seconds * 1000 / rating` (yardstick number)
/// - IRC and YTC: `elapsed_seconds * rating` (time-correction factor)
/// - any other system: elapsed seconds verbatim
///
/// The rating must be > 0 for every system.
pub fn corrected_time(
    system: &HandicapSystem,
    elapsed: ElapsedTime,
    rating: Decimal,
) -> Result<Decimal> {
    if rating <= Decimal::ZERO {
        return Err(ScoringError::InvalidRating(rating));
    }

    let seconds = elapsed.total_seconds();
    let corrected = match system {
        HandicapSystem::Portsmouth => seconds
            .checked_mul(Decimal::from(1_000))
            .and_then(|scaled| scaled.checked_div(rating)),
        HandicapSystem::Irc => seconds.checked_mul(rating),
        HandicapSystem::Ytc => time_correction_factor(seconds, rating),
        HandicapSystem::Other(name) => {
            debug!("Unknown handicap system '{}', using elapsed time", name);
            Some(seconds)
        }
    };

    // Only a rating far outside any real scale can overflow.
    corrected.ok_or(ScoringError::InvalidRating(rating))
}

// YTC shares the IRC time-on-time form for now.
fn time_correction_factor(seconds: Decimal, rating: Decimal) -> Option<Decimal> {
    seconds.checked_mul(rating)
}

/// Corrected time for a result in `race`.
///
/// Returns `None` when there is no finish time. One-design races use the
/// elapsed time as is; open races need a handicap number.
pub fn correct_for_race(
    race: &Race,
    finish_time: Option<ElapsedTime>,
    handicap_number: Option<Decimal>,
) -> Result<Option<Decimal>> {
    let Some(elapsed) = finish_time else {
        return Ok(None);
    };

    if race.is_one_design() {
        return Ok(Some(elapsed.total_seconds()));
    }

    let rating = handicap_number.ok_or(ScoringError::MissingHandicap)?;
    corrected_time(&race.handicap_system, elapsed, rating).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HandicapType, ScoringSystem};

    fn race(handicap_type: HandicapType, system: HandicapSystem) -> Race {
        Race {
            id: "r1".to_string(),
            name: "Race 1".to_string(),
            handicap_type,
            handicap_system: system,
            scoring_system: ScoringSystem::LowPoint,
            is_medal_race: false,
            include_overall: true,
            classes: Vec::new(),
        }
    }

    #[test]
    fn test_portsmouth_divides_by_yardstick() {
        let elapsed = ElapsedTime::from_hms(1, 0, 0);
        let corrected =
            corrected_time(&HandicapSystem::Portsmouth, elapsed, Decimal::from(1200)).unwrap();
        assert_eq!(corrected, Decimal::from(3000));
    }

    #[test]
    fn test_irc_multiplies_by_factor() {
        let elapsed = ElapsedTime::from_secs(1000);
        let corrected =
            corrected_time(&HandicapSystem::Irc, elapsed, Decimal::new(1_050, 3)).unwrap();
        assert_eq!(corrected, Decimal::from(1050));
    }

    #[test]
    fn test_ytc_matches_irc() {
        let elapsed = ElapsedTime::from_secs(2_345);
        let rating = Decimal::new(987, 3);
        assert_eq!(
            corrected_time(&HandicapSystem::Ytc, elapsed, rating).unwrap(),
            corrected_time(&HandicapSystem::Irc, elapsed, rating).unwrap()
        );
    }

    #[test]
    fn test_unknown_system_uses_elapsed() {
        let elapsed = ElapsedTime::from_secs(600);
        let system = HandicapSystem::Other("ORC".to_string());
        assert_eq!(corrected_time(&system, elapsed, Decimal::from(2)).unwrap(), Decimal::from(600));
    }

    #[test]
    fn test_non_positive_rating_rejected() {
        let elapsed = ElapsedTime::from_secs(600);
        for rating in [Decimal::ZERO, Decimal::from(-1100)] {
            assert!(matches!(
                corrected_time(&HandicapSystem::Portsmouth, elapsed, rating),
                Err(ScoringError::InvalidRating(r)) if r == rating
            ));
        }
    }

    #[test]
    fn test_one_design_ignores_handicap() {
        let race = race(HandicapType::OneDesign, HandicapSystem::Portsmouth);
        let corrected = correct_for_race(&race, Some(ElapsedTime::from_secs(1234)), None).unwrap();
        assert_eq!(corrected, Some(Decimal::from(1234)));
    }

    #[test]
    fn test_open_race_requires_handicap() {
        let race = race(HandicapType::Open, HandicapSystem::Irc);
        assert!(matches!(
            correct_for_race(&race, Some(ElapsedTime::from_secs(100)), None),
            Err(ScoringError::MissingHandicap)
        ));
    }

    #[test]
    fn test_no_finish_time_has_no_corrected_time() {
        let race = race(HandicapType::Open, HandicapSystem::Portsmouth);
        assert_eq!(correct_for_race(&race, None, None).unwrap(), None);
    }
}
