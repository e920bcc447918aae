use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

mod sqlite;

pub use sqlite::SqliteStore;

/// Key-value persistence contract: one durable string slot per key.
///
/// The tracker touches it once per session lifetime, to store or retrieve
/// the session identifier; implementations decide what "durable" means.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store for tests and embedders that do not need reload survival.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert_eq!(store.get("session_id").await.unwrap(), None);

        store.set("session_id", "sess_1_abc").await.unwrap();
        assert_eq!(
            store.get("session_id").await.unwrap().as_deref(),
            Some("sess_1_abc")
        );

        store.set("session_id", "sess_2_def").await.unwrap();
        assert_eq!(
            store.get("session_id").await.unwrap().as_deref(),
            Some("sess_2_def")
        );
    }
}
