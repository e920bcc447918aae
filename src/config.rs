use std::path::Path;
use std::{fs, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Fallback ingestion endpoint; embedders normally supply their own.
pub const DEFAULT_ENDPOINT: &str = "https://tracker.example.com/api/track-click";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Endpoint receiving the JSON reports.
    pub endpoint: String,
    /// Location poll cadence for the navigation detector.
    pub poll_interval_ms: u64,
    /// Delay after a history signal before re-reading the location.
    pub settle_delay_ms: u64,
    /// Visits shorter than this (rounded seconds) never report an exit.
    pub min_visit_secs: u64,
    /// Width of the dedup time bucket.
    pub bucket_secs: u64,
    /// Dedup entries are evicted after this many bucket widths.
    pub dedup_retention_buckets: u64,
    /// Key under which the session identifier is persisted.
    pub session_key: String,
    pub request_timeout_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            poll_interval_ms: 500,
            settle_delay_ms: 100,
            min_visit_secs: 1,
            bucket_secs: 5,
            dedup_retention_buckets: 6,
            session_key: "session_id".into(),
            request_timeout_ms: 10_000,
        }
    }
}

impl TrackerConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Load from a JSON file. A missing or malformed file falls back to the
    /// defaults so the embedder keeps tracking either way.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read tracker config from {}", path.display()))?;
        Ok(serde_json::from_str(&contents).unwrap_or_default())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn dedup_retention(&self) -> Duration {
        Duration::from_secs(self.bucket_secs.max(1) * self.dedup_retention_buckets.max(1))
    }
}
