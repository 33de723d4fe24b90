use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower_sessions::ExpiredDeletion;

/// Periodically remove expired sessions from `store`.
///
/// Runs until the returned handle is aborted. A failed sweep is logged
/// and retried on the next tick.
pub fn spawn_expiry_sweep<S>(store: S, period: Duration) -> JoinHandle<()>
where
    S: ExpiredDeletion + Clone,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            match store.delete_expired().await {
                Ok(()) => tracing::debug!("Expired sessions swept"),
                Err(e) => tracing::warn!(error = %e, "Expired session sweep failed"),
            }
        }
    })
}
