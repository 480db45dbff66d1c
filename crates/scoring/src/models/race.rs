use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::class::Class;

/// Whether boats race on handicap or as identical boats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandicapType {
    #[default]
    Open,
    OneDesign,
}

/// Rating scheme used to correct elapsed times in an open race.
///
/// Names the race configuration may carry but the engine does not know are
/// kept verbatim in `Other`; such races are scored on elapsed time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HandicapSystem {
    #[default]
    Portsmouth,
    Irc,
    Ytc,
    Other(String),
}

impl HandicapSystem {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Portsmouth => "Portsmouth",
            Self::Irc => "IRC",
            Self::Ytc => "YTC",
            Self::Other(name) => name,
        }
    }

    /// Short tag used by handicap filters.
    pub fn tag(&self) -> Option<HandicapTag> {
        match self {
            Self::Portsmouth => Some(HandicapTag::Py),
            Self::Irc => Some(HandicapTag::Irc),
            Self::Ytc => Some(HandicapTag::Ytc),
            Self::Other(_) => None,
        }
    }
}

impl From<String> for HandicapSystem {
    fn from(value: String) -> Self {
        match value.trim().to_uppercase().as_str() {
            "PORTSMOUTH" | "PY" => Self::Portsmouth,
            "IRC" => Self::Irc,
            "YTC" => Self::Ytc,
            _ => Self::Other(value),
        }
    }
}

impl From<HandicapSystem> for String {
    fn from(value: HandicapSystem) -> Self {
        match value {
            HandicapSystem::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for HandicapSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter tag naming a handicap system: `PY`, `IRC` or `YTC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HandicapTag {
    Py,
    Irc,
    Ytc,
}

impl HandicapTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Py => "PY",
            Self::Irc => "IRC",
            Self::Ytc => "YTC",
        }
    }
}

impl FromStr for HandicapTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PY" => Ok(Self::Py),
            "IRC" => Ok(Self::Irc),
            "YTC" => Ok(Self::Ytc),
            other => Err(format!("unknown handicap tag '{}'", other)),
        }
    }
}

impl fmt::Display for HandicapTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points convention for a race. Unrecognised names score as low point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScoringSystem {
    #[default]
    LowPoint,
    HighPoint,
}

impl ScoringSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowPoint => "LowPoint",
            Self::HighPoint => "HighPoint",
        }
    }
}

impl From<String> for ScoringSystem {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("HighPoint") {
            Self::HighPoint
        } else {
            Self::LowPoint
        }
    }
}

impl From<ScoringSystem> for String {
    fn from(value: ScoringSystem) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub handicap_type: HandicapType,
    #[serde(default)]
    pub handicap_system: HandicapSystem,
    #[serde(default)]
    pub scoring_system: ScoringSystem,
    #[serde(default)]
    pub is_medal_race: bool,
    #[serde(default = "default_include_overall")]
    pub include_overall: bool,
    #[serde(default)]
    pub classes: Vec<Class>,
}

fn default_include_overall() -> bool {
    true
}

impl Race {
    pub fn is_one_design(&self) -> bool {
        self.handicap_type == HandicapType::OneDesign
    }

    pub fn class_by_id(&self, class_id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == class_id)
    }

    /// Looks a class up by id first, then by name.
    pub fn resolve_class(&self, id_or_name: &str) -> Option<&Class> {
        self.class_by_id(id_or_name)
            .or_else(|| self.classes.iter().find(|c| c.name == id_or_name))
    }
}
