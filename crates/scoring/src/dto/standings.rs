use serde::Serialize;

/// A sailor's score in one race of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceScore {
    pub race_id: String,
    pub race_name: String,
    pub points: u32,
    pub discarded: bool,
}

/// A sailor's line in series standings.
#[derive(Debug, Clone, Serialize)]
pub struct Standing {
    pub rank: u32,
    pub sailor_name: String,
    /// Total after discards; lowest wins.
    pub net_points: u32,
    /// Total before discards.
    pub gross_points: u32,
    pub races: Vec<RaceScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassStandings {
    pub class_name: String,
    pub standings: Vec<Standing>,
}
