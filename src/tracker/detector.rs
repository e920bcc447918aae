use std::sync::Arc;

use log::debug;
use tokio::time::{self, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::host::HostPage;

use super::controller::VisitTracker;

/// Poll the host location and open a new visit whenever it changes.
///
/// The host fires no native event for in-page navigations, so comparing the
/// location string on a fixed interval is the primary signal; the history
/// fast path in the signal listener layers on top of it.
pub async fn detection_loop(
    tracker: VisitTracker,
    host: Arc<dyn HostPage>,
    poll_interval: Duration,
    cancel_token: CancellationToken,
) {
    let mut ticker = time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_seen = host.location();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let current = host.location();
                if current != last_seen {
                    debug!("location changed: {last_seen} -> {current}");
                    last_seen = current;
                    tracker.on_navigation().await;
                }
            }
            _ = cancel_token.cancelled() => {
                debug!("navigation detector shutting down");
                break;
            }
        }
    }
}
