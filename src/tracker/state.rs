use tokio::time::Instant;

/// The single active page view.
///
/// A new navigation supersedes the previous value wholesale; an abandoned
/// visit is never revisited.
#[derive(Debug, Clone)]
pub struct Visit {
    pub page_name: String,
    pub started_at: Instant,
    pub arrival_sent: bool,
    pub exit_sent: bool,
}

impl Visit {
    pub fn begin(page_name: String) -> Self {
        Self {
            page_name,
            started_at: Instant::now(),
            arrival_sent: false,
            exit_sent: false,
        }
    }

    /// Seconds on page, rounded to the nearest whole second.
    pub fn seconds_on_page(&self) -> u64 {
        self.started_at.elapsed().as_secs_f64().round() as u64
    }
}
