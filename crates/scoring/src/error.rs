use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid rating: {0}. Rating must be > 0")]
    InvalidRating(Decimal),

    #[error("Malformed filter: {0}")]
    MalformedFilter(String),

    #[error("Invalid finish time: '{0}'. Use hh:mm:ss, h:mm:ss, mm:ss or m:ss")]
    InvalidFinishTime(String),

    #[error("Handicap number is required for open handicap races")]
    MissingHandicap,

    #[error("A result needs either a finish time or a status code")]
    MissingFinish,

    #[error("Race not found: {0}")]
    RaceNotFound(String),

    #[error("Class '{class}' not found in race {race_id}")]
    ClassNotFound { race_id: String, class: String },

    #[error("Result not found: {0}")]
    ResultNotFound(String),

    #[error("Invalid submission: {0}")]
    InvalidSubmission(#[from] ValidationErrors),

    #[error("Snapshot is stale: loaded at {loaded}, store now at {current}")]
    StaleSnapshot {
        loaded: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

pub type Result<T> = std::result::Result<T, ScoringError>;

impl ScoringError {
    /// Errors caused by the submitted data rather than by the collections
    /// the caller handed over.
    pub fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            ScoringError::InvalidRating(_)
                | ScoringError::InvalidFinishTime(_)
                | ScoringError::MissingHandicap
                | ScoringError::MissingFinish
                | ScoringError::ClassNotFound { .. }
                | ScoringError::InvalidSubmission(_)
        )
    }
}
