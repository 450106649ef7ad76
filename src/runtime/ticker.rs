//! Cancellable periodic tick source

use futures_util::future::{AbortHandle, Abortable};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// A spawned timer task that sends its epoch on every tick
///
/// Dropping or cancelling the ticker aborts the task. Ticks it already queued still carry
/// the old epoch, so the receiver can tell them apart from a newer ticker's.
#[derive(Debug)]
pub struct Ticker {
    epoch: u64,
    abort_handle: AbortHandle,
}

impl Ticker {
    /// Spawn a ticker; with `immediate` the first tick fires right away instead of after `period`
    pub fn spawn(
        period: Duration,
        epoch: u64,
        immediate: bool,
        ticks: mpsc::UnboundedSender<u64>,
    ) -> Self {
        let (abort_handle, abort_registration) = AbortHandle::new_pair();

        let first = if immediate {
            Instant::now()
        } else {
            Instant::now() + period
        };

        let task = async move {
            let mut interval = time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                trace!(epoch, "ticker fired");
                if ticks.send(epoch).is_err() {
                    break;
                }
            }
        };

        tokio::spawn(Abortable::new(task, abort_registration));

        Self {
            epoch,
            abort_handle,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn cancel(&self) {
        self.abort_handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.abort_handle.abort();
    }
}
