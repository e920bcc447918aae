//! Page-visit lifecycle tracking: one active visit per page, idempotent
//! arrival/exit reports, and fire-and-forget delivery to a fixed endpoint.
//!
//! The embedder owns exactly one [`Tracker`], supplies the host environment
//! (location, referrer, user agent, departure signals) and the tracker owns
//! the lifecycle policy.

pub mod config;
pub mod dedup;
pub mod host;
pub mod models;
pub mod page_name;
pub mod session;
pub mod store;
pub mod tracker;
pub mod transport;

pub use config::TrackerConfig;
pub use host::{HostPage, HostSignal};
pub use models::{EventKind, ReportPayload};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
pub use tracker::{Tracker, VisitTracker};
pub use transport::{HttpTransport, Transport};
