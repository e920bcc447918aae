use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Arrival,
    Exit,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Arrival => "arrival",
            EventKind::Exit => "exit",
        }
    }
}

/// The wire entity. Field names match the ingestion endpoint exactly;
/// constructed fresh per send, no identity beyond its values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportPayload {
    pub page_name: String,
    pub tag: EventKind,
    pub time_on_page: u64,
    pub session_id: String,
    pub referrer: String,
    pub user_agent: String,
    /// Always null on the client; the endpoint fills it in server-side.
    pub ip: Option<String>,
}
