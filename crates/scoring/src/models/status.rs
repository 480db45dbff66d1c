use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::race::ScoringSystem;

/// Non-finishing status code. A result without one is a finisher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PenaltyCode {
    /// Did not start
    Dns,
    /// Did not compete
    Dnc,
    /// Did not finish
    Dnf,
    /// Retired
    Ret,
}

impl PenaltyCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dns => "DNS",
            Self::Dnc => "DNC",
            Self::Dnf => "DNF",
            Self::Ret => "RET",
        }
    }

    /// Fixed points for this code. `boats_in_race` counts every result in
    /// the race, finishers and non-finishers across all classes.
    pub fn penalty_points(&self, scoring: ScoringSystem, boats_in_race: u32) -> u32 {
        match (scoring, self) {
            (ScoringSystem::HighPoint, Self::Dns | Self::Dnc) => 0,
            (ScoringSystem::HighPoint, Self::Dnf | Self::Ret) => 1,
            (ScoringSystem::LowPoint, _) => boats_in_race + 1,
        }
    }
}

impl FromStr for PenaltyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DNS" => Ok(Self::Dns),
            "DNC" => Ok(Self::Dnc),
            "DNF" => Ok(Self::Dnf),
            "RET" => Ok(Self::Ret),
            other => Err(format!("unknown status code '{}'", other)),
        }
    }
}

impl fmt::Display for PenaltyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_point_penalty_is_race_size_plus_one() {
        for code in [PenaltyCode::Dns, PenaltyCode::Dnc, PenaltyCode::Dnf, PenaltyCode::Ret] {
            assert_eq!(code.penalty_points(ScoringSystem::LowPoint, 5), 6);
        }
    }

    #[test]
    fn test_high_point_penalties() {
        assert_eq!(PenaltyCode::Dns.penalty_points(ScoringSystem::HighPoint, 5), 0);
        assert_eq!(PenaltyCode::Dnc.penalty_points(ScoringSystem::HighPoint, 5), 0);
        assert_eq!(PenaltyCode::Dnf.penalty_points(ScoringSystem::HighPoint, 5), 1);
        assert_eq!(PenaltyCode::Ret.penalty_points(ScoringSystem::HighPoint, 5), 1);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("dnf".parse::<PenaltyCode>(), Ok(PenaltyCode::Dnf));
        assert!("OCS".parse::<PenaltyCode>().is_err());
    }
}
