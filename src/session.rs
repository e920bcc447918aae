//! Session identity.
//!
//! One token per browsing session, persisted through the key-value store so
//! it survives reloads within the same storage scope. Immutable once
//! created.

use chrono::Utc;
use log::{info, warn};
use rand::Rng;

use crate::store::KeyValueStore;

const SESSION_ID_PREFIX: &str = "sess";
const RANDOM_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Build a fresh `sess_<unix-millis>_<random base36>` token.
pub fn generate_session_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!(
        "{SESSION_ID_PREFIX}_{}_{suffix}",
        Utc::now().timestamp_millis()
    )
}

/// Fetch the persisted session id, creating and storing one on first use.
///
/// A store failure degrades to a fresh id for this process only: session
/// continuity is lost, the tracker keeps working.
pub async fn load_or_create_session_id(store: &dyn KeyValueStore, key: &str) -> String {
    match store.get(key).await {
        Ok(Some(existing)) => existing,
        Ok(None) => {
            let id = generate_session_id();
            if let Err(err) = store.set(key, &id).await {
                warn!("failed to persist session id: {err:#}");
            } else {
                info!("created session {id}");
            }
            id
        }
        Err(err) => {
            warn!("session store unavailable, using ephemeral session id: {err:#}");
            generate_session_id()
        }
    }
}
