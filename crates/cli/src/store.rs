use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scoring::ScoringError;
use scoring::models::{Event, RaceResult, Snapshot};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::error::{CliError, Result};

/// Where the CLI loads events and loads/saves results.
///
/// Saving takes the `last_updated` of the snapshot the caller loaded and
/// fails with `ConcurrentModification` if the stored collection has moved on.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn load_events(&self) -> Result<Snapshot<Event>>;
    async fn load_results(&self) -> Result<Snapshot<RaceResult>>;
    async fn save_results(
        &self,
        loaded: DateTime<Utc>,
        results: Vec<RaceResult>,
    ) -> Result<Snapshot<RaceResult>>;
}

/// JSON files on disk. Accepts both timestamp-wrapped files and bare arrays;
/// always writes the wrapped form.
pub struct JsonStore {
    events_path: PathBuf,
    results_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(config: &Config) -> Self {
        Self {
            events_path: config.events_path.clone(),
            results_path: config.results_path.clone(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl ResultStore for JsonStore {
    async fn load_events(&self) -> Result<Snapshot<Event>> {
        read_collection(&self.events_path).await
    }

    async fn load_results(&self) -> Result<Snapshot<RaceResult>> {
        read_collection(&self.results_path).await
    }

    async fn save_results(
        &self,
        loaded: DateTime<Utc>,
        results: Vec<RaceResult>,
    ) -> Result<Snapshot<RaceResult>> {
        let _guard = self.write_lock.lock().await;

        let mut current: Snapshot<RaceResult> = read_collection(&self.results_path).await?;
        current.ensure_current(loaded).map_err(|e| match e {
            ScoringError::StaleSnapshot { .. } => CliError::ConcurrentModification {
                path: self.results_path.clone(),
            },
            other => CliError::Scoring(other),
        })?;

        current.replace(results);
        write_collection(&self.results_path, &current).await?;
        tracing::info!(
            "Saved {} result(s) to {}",
            current.data.len(),
            self.results_path.display()
        );
        Ok(current)
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum StoredCollection<T> {
    Wrapped(Snapshot<T>),
    Bare(Vec<T>),
}

// Bare arrays and missing files have no timestamp of their own.
async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Snapshot<T>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("{} does not exist yet, starting empty", path.display());
            return Ok(Snapshot::with_timestamp(Vec::new(), DateTime::<Utc>::UNIX_EPOCH));
        }
        Err(e) => return Err(e.into()),
    };

    if content.trim().is_empty() {
        return Ok(Snapshot::with_timestamp(Vec::new(), DateTime::<Utc>::UNIX_EPOCH));
    }

    Ok(match serde_json::from_str(&content)? {
        StoredCollection::Wrapped(snapshot) => snapshot,
        StoredCollection::Bare(data) => Snapshot::with_timestamp(data, DateTime::<Utc>::UNIX_EPOCH),
    })
}

async fn write_collection<T: Serialize>(path: &Path, snapshot: &Snapshot<T>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Looks an event up by id.
pub fn find_event<'a>(events: &'a [Event], event_id: &str) -> Result<&'a Event> {
    events
        .iter()
        .find(|e| e.id == event_id)
        .ok_or_else(|| CliError::EventNotFound(event_id.to_string()))
}
