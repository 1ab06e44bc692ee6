//! Fixed-interval refresh loop used for logs and telemetry.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::error::ClientError;

/// Outcome counters for a finished polling loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub succeeded: u64,
    pub failed: u64,
}

/// Calls `fetch` immediately and then every `period` until `shutdown`
/// resolves, handing each successful result to `on_update`.
///
/// Fetches never overlap: a slow fetch delays the next tick instead of
/// stacking ticks up. A failed fetch is logged and the loop keeps going.
/// `shutdown` is checked between fetches, not during one.
pub async fn poll_every<T, F, Fut, U, S>(
    period: Duration,
    shutdown: S,
    mut fetch: F,
    mut on_update: U,
) -> PollStats
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
    U: FnMut(T),
    S: Future<Output = ()>,
{
    let mut stats = PollStats::default();
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => break,
            _ = ticker.tick() => {
                match fetch().await {
                    Ok(value) => {
                        stats.succeeded += 1;
                        on_update(value);
                    }
                    Err(err) => {
                        stats.failed += 1;
                        tracing::warn!(error = %err, "poll failed; retrying on next tick");
                    }
                }
            }
        }
    }

    tracing::debug!(succeeded = stats.succeeded, failed = stats.failed, "polling stopped");
    stats
}
