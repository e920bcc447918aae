use log::debug;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

use crate::host::HostSignal;

use super::controller::VisitTracker;

/// Bridge the host's departure and history signals into tracker calls.
///
/// Unload, visibility-hidden and blur all funnel into one idempotent exit
/// report. The tracker is the sole owner of current-visit state, so this
/// task holds none and needs no re-registration across navigations.
pub async fn signal_loop(
    tracker: VisitTracker,
    mut signals: mpsc::Receiver<HostSignal>,
    settle_delay: Duration,
    cancel_token: CancellationToken,
) {
    loop {
        tokio::select! {
            maybe_signal = signals.recv() => {
                let Some(signal) = maybe_signal else {
                    debug!("host signal channel closed");
                    break;
                };
                match signal {
                    HostSignal::Unload | HostSignal::Blur => tracker.report_exit().await,
                    HostSignal::VisibilityChanged { hidden: true } => tracker.report_exit().await,
                    HostSignal::VisibilityChanged { hidden: false } => {}
                    HostSignal::HistoryChanged => {
                        // Let the new location commit before reading it.
                        let tracker = tracker.clone();
                        tokio::spawn(async move {
                            sleep(settle_delay).await;
                            tracker.on_navigation().await;
                        });
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                debug!("exit signal listener shutting down");
                break;
            }
        }
    }
}
