use scoring::ScoringError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("{} was modified by another writer; reload and try again", path.display())]
    ConcurrentModification { path: PathBuf },
}
