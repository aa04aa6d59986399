//! Notification logging background task

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, trace, warn};

use crate::scheduler::Notification;

/// Logs every scheduler notification until the channel closes
pub async fn notification_log_task(mut rx: broadcast::Receiver<Notification>) {
    info!("Starting notification log task");

    loop {
        match rx.recv().await {
            Ok(Notification::StateChanged {
                phase,
                remaining_seconds,
            }) => {
                info!(%phase, remaining_seconds, "Session state changed");
            }
            Ok(Notification::Tick { remaining_seconds }) => {
                trace!(remaining_seconds, "tick");
            }
            Ok(Notification::Completed) => {
                info!("Phase time is up");
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Notification log fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }

    info!("Notification log task stopped");
}
