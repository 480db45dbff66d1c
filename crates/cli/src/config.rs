use std::path::{Path, PathBuf};

/// Resolved locations of the collections the CLI works on.
#[derive(Debug, Clone)]
pub struct Config {
    pub events_path: PathBuf,
    pub results_path: PathBuf,
}

impl Config {
    /// Relative file names are taken inside `data_dir`; absolute ones are
    /// used as given.
    pub fn new(data_dir: &Path, events_file: &Path, results_file: &Path) -> Self {
        Self {
            events_path: data_dir.join(events_file),
            results_path: data_dir.join(results_file),
        }
    }
}
