//! Contract between the tracker and its hosting environment.

/// Read-only view of the page the host currently displays.
///
/// The tracker never caches these values across navigations; it re-reads
/// them whenever it opens a visit or builds a payload.
pub trait HostPage: Send + Sync {
    /// Full location string, compared verbatim by the navigation detector.
    fn location(&self) -> String;

    /// Path plus query string; the input to page-name normalization.
    fn path_and_query(&self) -> String;

    /// Referrer as the host reports it; may be empty for direct visits.
    fn referrer(&self) -> String;

    fn user_agent(&self) -> String;
}

/// Signals the host forwards from its event sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// The page is being torn down.
    Unload,
    /// Tab visibility flipped; only `hidden == true` counts as a departure.
    VisibilityChanged { hidden: bool },
    /// The window lost input focus.
    Blur,
    /// A history navigation fired (back/forward).
    HistoryChanged,
}
