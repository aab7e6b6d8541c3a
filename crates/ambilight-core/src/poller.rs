// ── Periodic refresh ──
//
// A cancellable interval task. The session runs diagnostics through it;
// anything returning `Result<(), CoreError>` can be polled.

use std::future::Future;
use std::time::Duration;

use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::CoreError;

/// Diagnostics refresh period.
pub const DIAGNOSTICS_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to a running periodic task.
#[derive(Debug)]
pub struct Poller {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Run `tick` every `period` until `cancel` fires or `tick` returns
    /// `None`.
    ///
    /// The first tick happens one full period after spawning. Each tick
    /// runs as its own task, so a slow tick never delays the next one. A
    /// failed tick is logged and the next one runs on schedule.
    ///
    /// Panics if `period` is zero.
    pub fn spawn<F, Fut>(period: Duration, cancel: CancellationToken, tick: F) -> Self
    where
        F: FnMut() -> Option<Fut> + Send + 'static,
        Fut: Future<Output = Result<(), CoreError>> + Send + 'static,
    {
        let handle = tokio::spawn(poll_task(period, cancel.clone(), tick));
        Self { cancel, handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Cancel the task and wait for it to exit. Ticks still in flight are
    /// aborted.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

async fn poll_task<F, Fut>(period: Duration, cancel: CancellationToken, mut tick: F)
where
    F: FnMut() -> Option<Fut> + Send + 'static,
    Fut: Future<Output = Result<(), CoreError>> + Send + 'static,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // consume the immediate first tick

    let mut in_flight = JoinSet::new();
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            _ = interval.tick() => {
                let Some(fut) = tick() else {
                    debug!("poll target gone");
                    break;
                };
                in_flight.spawn(async move {
                    if let Err(e) = fut.await {
                        warn!(error = %e, "periodic refresh failed");
                    }
                });
            }
        }
    }

    in_flight.shutdown().await;
    debug!("poller stopped");
}
