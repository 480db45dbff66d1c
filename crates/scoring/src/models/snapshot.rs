use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};

/// A persisted collection together with the time it was last written.
///
/// Callers keep the `last_updated` they loaded and hand it back before
/// saving; a mismatch means another writer saved in between.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub last_updated: DateTime<Utc>,
    pub data: Vec<T>,
}

impl<T> Snapshot<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            last_updated: Utc::now(),
            data,
        }
    }

    pub fn with_timestamp(data: Vec<T>, last_updated: DateTime<Utc>) -> Self {
        Self { last_updated, data }
    }

    /// Fails with `StaleSnapshot` unless `loaded` is still the current version.
    pub fn ensure_current(&self, loaded: DateTime<Utc>) -> Result<()> {
        if self.last_updated != loaded {
            return Err(ScoringError::StaleSnapshot {
                loaded,
                current: self.last_updated,
            });
        }
        Ok(())
    }

    /// Replaces the data and advances the timestamp.
    pub fn replace(&mut self, data: Vec<T>) {
        self.data = data;
        let now = Utc::now();
        // Two saves inside one clock tick must still be distinguishable.
        self.last_updated = if now > self.last_updated {
            now
        } else {
            self.last_updated + chrono::TimeDelta::microseconds(1)
        };
    }
}
