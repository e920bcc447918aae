//! Duplicate-request registry.
//!
//! Host-level departure events tend to arrive in bursts (blur, visibility
//! change and unload firing together), so every outbound report is keyed by
//! `(page, kind, bucket)` where the bucket coarsens elapsed seconds. Reports
//! landing in the same bucket collapse to one send.

use std::collections::HashMap;

use tokio::time::{Duration, Instant};

use crate::models::EventKind;

/// Dedup key for one outbound report.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeliveryRecord {
    pub page_name: String,
    pub kind: EventKind,
    pub bucket: u64,
}

impl DeliveryRecord {
    pub fn new(page_name: &str, kind: EventKind, seconds_on_page: u64, bucket_secs: u64) -> Self {
        let width = bucket_secs.max(1);
        Self {
            page_name: page_name.to_string(),
            kind,
            bucket: (seconds_on_page / width) * width,
        }
    }
}

/// Process-wide registry of already-dispatched reports.
///
/// Entries older than the retention window are evicted on access, so a
/// long-lived single-page session keeps the registry bounded to the live
/// window instead of growing forever.
pub struct DeliveryLog {
    entries: HashMap<DeliveryRecord, Instant>,
    retention: Duration,
}

impl DeliveryLog {
    pub fn new(retention: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            retention,
        }
    }

    /// True when `record` was already dispatched within the retention window.
    pub fn is_duplicate(&mut self, record: &DeliveryRecord) -> bool {
        self.prune();
        self.entries.contains_key(record)
    }

    pub fn record(&mut self, record: DeliveryRecord) {
        self.prune();
        self.entries.insert(record, Instant::now());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn prune(&mut self) {
        let retention = self.retention;
        self.entries.retain(|_, inserted| inserted.elapsed() < retention);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with_retention_secs(secs: u64) -> DeliveryLog {
        DeliveryLog::new(Duration::from_secs(secs))
    }

    #[test]
    fn same_bucket_collapses() {
        let a = DeliveryRecord::new("/docs", EventKind::Exit, 3, 5);
        let b = DeliveryRecord::new("/docs", EventKind::Exit, 4, 5);
        assert_eq!(a, b);
    }

    #[test]
    fn later_bucket_is_distinct() {
        let a = DeliveryRecord::new("/docs", EventKind::Exit, 4, 5);
        let b = DeliveryRecord::new("/docs", EventKind::Exit, 7, 5);
        assert_ne!(a.bucket, b.bucket);
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_within_bucket_is_blocked() {
        let mut log = log_with_retention_secs(30);
        let first = DeliveryRecord::new("/docs", EventKind::Exit, 3, 5);
        assert!(!log.is_duplicate(&first));
        log.record(first.clone());

        let burst = DeliveryRecord::new("/docs", EventKind::Exit, 4, 5);
        assert!(log.is_duplicate(&burst));

        let next_bucket = DeliveryRecord::new("/docs", EventKind::Exit, 7, 5);
        assert!(!log.is_duplicate(&next_bucket));
    }

    #[tokio::test(start_paused = true)]
    async fn kinds_and_pages_do_not_collide() {
        let mut log = log_with_retention_secs(30);
        log.record(DeliveryRecord::new("/docs", EventKind::Arrival, 0, 5));

        assert!(!log.is_duplicate(&DeliveryRecord::new("/docs", EventKind::Exit, 0, 5)));
        assert!(!log.is_duplicate(&DeliveryRecord::new("/blog", EventKind::Arrival, 0, 5)));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_entries_are_evicted() {
        let mut log = log_with_retention_secs(30);
        let record = DeliveryRecord::new("/docs", EventKind::Arrival, 0, 5);
        log.record(record.clone());
        assert!(log.is_duplicate(&record));

        tokio::time::advance(Duration::from_secs(31)).await;

        assert!(!log.is_duplicate(&record));
        assert!(log.is_empty());
    }
}
