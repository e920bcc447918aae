use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::{debug, error, info};
use tokio::sync::Mutex;

use crate::{
    config::TrackerConfig,
    dedup::{DeliveryLog, DeliveryRecord},
    host::HostPage,
    models::{EventKind, ReportPayload},
    page_name::normalize_page_name,
    transport::Transport,
};

use super::state::Visit;

/// Owns the single active visit and gates report dispatch.
///
/// Every operation is infallible toward the embedder: failures are logged
/// and swallowed, never propagated into the hosting application's control
/// flow.
#[derive(Clone)]
pub struct VisitTracker {
    visit: Arc<Mutex<Option<Visit>>>,
    deliveries: Arc<Mutex<DeliveryLog>>,
    in_flight: Arc<AtomicBool>,
    host: Arc<dyn HostPage>,
    transport: Arc<dyn Transport>,
    session_id: String,
    config: TrackerConfig,
}

impl VisitTracker {
    pub fn new(
        config: TrackerConfig,
        session_id: String,
        host: Arc<dyn HostPage>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let retention = config.dedup_retention();
        Self {
            visit: Arc::new(Mutex::new(None)),
            deliveries: Arc::new(Mutex::new(DeliveryLog::new(retention))),
            in_flight: Arc::new(AtomicBool::new(false)),
            host,
            transport,
            session_id,
            config,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Open a new visit for the page the host currently shows and report
    /// its arrival.
    ///
    /// The previous visit, if any, is simply abandoned; exit reporting for
    /// it is the signal listener's job, not this transition's. Calling this
    /// twice for one actual navigation is acceptable: the second call opens
    /// a second visit and the delivery registry absorbs the duplicate
    /// arrival send.
    pub async fn on_navigation(&self) {
        let page_name = normalize_page_name(&self.host.path_and_query());
        info!("visit opened for {page_name}");
        {
            let mut visit = self.visit.lock().await;
            *visit = Some(Visit::begin(page_name));
        }
        self.report_arrival().await;
    }

    /// Idempotent per visit: the first call wins, later ones are no-ops.
    pub async fn report_arrival(&self) {
        {
            let mut visit = self.visit.lock().await;
            let Some(current) = visit.as_mut() else {
                return;
            };
            if current.arrival_sent {
                return;
            }
            current.arrival_sent = true;
        }
        self.dispatch(EventKind::Arrival).await;
    }

    /// Idempotent per visit. Visits shorter than `min_visit_secs` never
    /// report an exit: an instantaneous navigation is not a real visit.
    pub async fn report_exit(&self) {
        {
            let mut visit = self.visit.lock().await;
            let Some(current) = visit.as_mut() else {
                return;
            };
            if current.exit_sent {
                return;
            }
            if current.seconds_on_page() < self.config.min_visit_secs {
                return;
            }
            current.exit_sent = true;
        }
        self.dispatch(EventKind::Exit).await;
    }

    /// Hand a report to the transport unless the delivery registry already
    /// saw it or another dispatch is in flight (single-flight per tracker
    /// instance, not per key). The send itself runs on a detached task so
    /// the caller never waits on the network.
    async fn dispatch(&self, kind: EventKind) {
        let (page_name, time_on_page) = {
            let visit = self.visit.lock().await;
            let Some(current) = visit.as_ref() else {
                return;
            };
            (current.page_name.clone(), current.seconds_on_page())
        };

        let record = DeliveryRecord::new(&page_name, kind, time_on_page, self.config.bucket_secs);
        {
            let mut deliveries = self.deliveries.lock().await;
            if deliveries.is_duplicate(&record) {
                debug!("duplicate {} for {page_name} dropped", kind.as_str());
                return;
            }
            if self.in_flight.swap(true, Ordering::SeqCst) {
                debug!(
                    "dispatch already in flight, {} for {page_name} dropped",
                    kind.as_str()
                );
                return;
            }
            deliveries.record(record);
        }

        let payload = ReportPayload {
            page_name,
            tag: kind,
            time_on_page,
            session_id: self.session_id.clone(),
            referrer: referrer_or_direct(self.host.referrer()),
            user_agent: self.host.user_agent(),
            ip: None,
        };

        let transport = Arc::clone(&self.transport);
        let in_flight = Arc::clone(&self.in_flight);
        tokio::spawn(async move {
            match transport.send(&payload).await {
                Ok(()) => info!(
                    "{} report sent for {}",
                    payload.tag.as_str(),
                    payload.page_name
                ),
                Err(err) => error!(
                    "{} report failed for {}: {err:#}",
                    payload.tag.as_str(),
                    payload.page_name
                ),
            }
            in_flight.store(false, Ordering::SeqCst);
        });
    }
}

fn referrer_or_direct(referrer: String) -> String {
    if referrer.is_empty() {
        "direct".to_string()
    } else {
        referrer
    }
}
