use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    config::TrackerConfig,
    host::{HostPage, HostSignal},
    session::load_or_create_session_id,
    store::KeyValueStore,
    transport::Transport,
};

use super::{detector::detection_loop, listener::signal_loop, VisitTracker};

/// Wires the tracker to its collaborators and owns its background tasks.
///
/// The embedder constructs exactly one of these and keeps it alive for the
/// lifetime of the page; there is no ambient global instance.
pub struct Tracker {
    visits: VisitTracker,
    cancel_token: CancellationToken,
    detector: JoinHandle<()>,
    listener: JoinHandle<()>,
}

impl Tracker {
    /// Resolve the session identity, open a visit for the page the host
    /// currently shows, and start the detector and listener tasks.
    pub async fn start(
        config: TrackerConfig,
        host: Arc<dyn HostPage>,
        store: &dyn KeyValueStore,
        transport: Arc<dyn Transport>,
        signals: mpsc::Receiver<HostSignal>,
    ) -> Result<Self> {
        let session_id = load_or_create_session_id(store, &config.session_key).await;
        info!("tracker starting with session {session_id}");

        let visits = VisitTracker::new(
            config.clone(),
            session_id,
            Arc::clone(&host),
            transport,
        );

        visits.on_navigation().await;

        let cancel_token = CancellationToken::new();
        let detector = tokio::spawn(detection_loop(
            visits.clone(),
            host,
            config.poll_interval(),
            cancel_token.clone(),
        ));
        let listener = tokio::spawn(signal_loop(
            visits.clone(),
            signals,
            config.settle_delay(),
            cancel_token.clone(),
        ));

        Ok(Self {
            visits,
            cancel_token,
            detector,
            listener,
        })
    }

    /// Direct handle for embedders that drive navigation themselves.
    pub fn visits(&self) -> &VisitTracker {
        &self.visits
    }

    pub fn session_id(&self) -> &str {
        self.visits.session_id()
    }

    /// Stop the detector and listener. In-flight report sends run on
    /// detached tasks and are left to finish on their own, so teardown
    /// never aborts a delivery already handed to the transport.
    pub async fn shutdown(self) -> Result<()> {
        self.cancel_token.cancel();
        self.detector
            .await
            .context("navigation detector task failed to join")?;
        self.listener
            .await
            .context("signal listener task failed to join")?;
        Ok(())
    }
}
