use chrono::TimeDelta;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScoringError};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Raw time a boat took from start to finish, at millisecond precision.
///
/// Serialized as `hh:mm:ss` (with `.fff` when there is a sub-second part),
/// prefixed by `d.` for a day or more so the text always parses back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElapsedTime(TimeDelta);

impl ElapsedTime {
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Self {
        let secs = i64::from(hours) * 3_600 + i64::from(minutes) * 60 + i64::from(seconds);
        Self(TimeDelta::seconds(secs))
    }

    pub fn from_secs(seconds: u32) -> Self {
        Self(TimeDelta::seconds(i64::from(seconds)))
    }

    pub fn from_millis(millis: u32) -> Self {
        Self(TimeDelta::milliseconds(i64::from(millis)))
    }

    pub fn as_time_delta(&self) -> TimeDelta {
        self.0
    }

    /// Elapsed time in seconds, keeping the millisecond part.
    pub fn total_seconds(&self) -> Decimal {
        Decimal::new(self.0.num_milliseconds(), 3)
    }
}

impl TryFrom<TimeDelta> for ElapsedTime {
    type Error = ScoringError;

    fn try_from(delta: TimeDelta) -> Result<Self> {
        if delta < TimeDelta::zero() {
            return Err(ScoringError::InvalidFinishTime(delta.to_string()));
        }
        Ok(Self(delta))
    }
}

impl FromStr for ElapsedTime {
    type Err = ScoringError;

    /// Accepts `hh:mm:ss`, `h:mm:ss`, `mm:ss`, `m:ss` and the general
    /// `[d.]hh:mm:ss[.fffffff]` form.
    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        parse_millis(input)
            .and_then(TimeDelta::try_milliseconds)
            .map(Self)
            .ok_or_else(|| ScoringError::InvalidFinishTime(input.to_string()))
    }
}

fn parse_millis(input: &str) -> Option<i64> {
    let parts: Vec<&str> = input.split(':').collect();
    let (days, hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => (0, 0, parse_field(m, 1, 2)?, *s),
        [h, m, s] => {
            let (days, hours) = match h.split_once('.') {
                Some((d, h)) => (parse_field(d, 1, 8)?, parse_field(h, 2, 2)?),
                None => (0, parse_field(h, 1, 2)?),
            };
            (days, hours, parse_field(m, 2, 2)?, *s)
        }
        _ => return None,
    };

    let (seconds, fraction) = match seconds.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (seconds, None),
    };
    let seconds = parse_field(seconds, 2, 2)?;
    let millis = match fraction {
        Some(digits) => parse_fraction_millis(digits)?,
        None => 0,
    };

    if hours >= 24 || minutes >= 60 || seconds >= 60 {
        return None;
    }

    days.checked_mul(MILLIS_PER_DAY)?
        .checked_add(hours * MILLIS_PER_HOUR)?
        .checked_add(minutes * MILLIS_PER_MINUTE)?
        .checked_add(seconds * MILLIS_PER_SECOND)?
        .checked_add(millis)
}

fn parse_field(field: &str, min_len: usize, max_len: usize) -> Option<i64> {
    let len = field.len();
    if len < min_len || len > max_len || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Up to seven fractional digits; anything below a millisecond is dropped.
fn parse_fraction_millis(digits: &str) -> Option<i64> {
    if digits.is_empty() || digits.len() > 7 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let millis: String = digits.chars().chain("00".chars()).take(3).collect();
    millis.parse().ok()
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.num_milliseconds();
        let days = total / MILLIS_PER_DAY;
        let hours = (total % MILLIS_PER_DAY) / MILLIS_PER_HOUR;
        let minutes = (total % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
        let seconds = (total % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
        let millis = total % MILLIS_PER_SECOND;

        if days > 0 {
            write!(f, "{}.", days)?;
        }
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)?;
        if millis != 0 {
            write!(f, ".{:03}", millis)?;
        }
        Ok(())
    }
}

impl Serialize for ElapsedTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ElapsedTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Renders a time in seconds as `hh:mm:ss`, rounded to the nearest second.
/// Did-not-finish results (no time) render as `-`.
pub fn format_seconds(seconds: Option<Decimal>) -> String {
    let Some(total) = seconds.map(|s| s.round()).and_then(|s| s.to_i64()) else {
        return "-".to_string();
    };
    format!(
        "{:02}:{:02}:{:02}",
        total / 3_600,
        (total % 3_600) / 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hh_mm_ss() {
        let t: ElapsedTime = "00:45:30".parse().unwrap();
        assert_eq!(t, ElapsedTime::from_hms(0, 45, 30));
        assert_eq!(t.total_seconds(), Decimal::from(2730));
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!("1:02:03".parse::<ElapsedTime>().unwrap(), ElapsedTime::from_hms(1, 2, 3));
        assert_eq!("45:30".parse::<ElapsedTime>().unwrap(), ElapsedTime::from_hms(0, 45, 30));
        assert_eq!("5:07".parse::<ElapsedTime>().unwrap(), ElapsedTime::from_hms(0, 5, 7));
    }

    #[test]
    fn test_parse_days_and_fraction() {
        let t: ElapsedTime = "1.02:00:00.25".parse().unwrap();
        assert_eq!(t.total_seconds(), Decimal::new(93_600_250, 3));
    }

    #[test]
    fn test_rejects_out_of_range_and_garbage() {
        let rejected = [
            "",
            "12",
            "00:60:00",
            "00:00:60",
            "24:00:00",
            "a:bc",
            "1:2:3",
            "-00:10:00",
            "00:10:00.12345678",
        ];
        for bad in rejected {
            assert!(
                matches!(bad.parse::<ElapsedTime>(), Err(ScoringError::InvalidFinishTime(_))),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_display_round_trips_through_serde() {
        let t = ElapsedTime::from_millis(3_723_500);
        assert_eq!(t.to_string(), "01:02:03.500");

        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"01:02:03.500\"");
        let back: ElapsedTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_multi_day_time_round_trips_through_serde() {
        let t: ElapsedTime = "1.01:00:00".parse().unwrap();
        assert_eq!(t, ElapsedTime::from_hms(25, 0, 0));
        assert_eq!(t.to_string(), "1.01:00:00");

        let json = serde_json::to_string(&t).unwrap();
        let back: ElapsedTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);

        let long = ElapsedTime::from_millis(2 * 86_400_000 + 3_723_040);
        assert_eq!(long.to_string(), "2.01:02:03.040");
        assert_eq!(long.to_string().parse::<ElapsedTime>().unwrap(), long);
    }

    #[test]
    fn test_negative_time_delta_rejected() {
        assert!(ElapsedTime::try_from(TimeDelta::seconds(-5)).is_err());
        assert!(ElapsedTime::try_from(TimeDelta::seconds(5)).is_ok());
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(None), "-");
        assert_eq!(format_seconds(Some(Decimal::new(24818_18, 2))), "06:53:38");
        assert_eq!(format_seconds(Some(Decimal::from(90_061))), "25:01:01");
    }
}
