//! One-shot completion latch with a bounded wait

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;

/// Completion signal for one racer.
///
/// A gate transitions from pending to done exactly once. Racer `i + 1`
/// waits on racer `i`'s gate, bounded by `max_delay` measured from the
/// start of the race, so a stalled predecessor can hold it back for at most
/// that long.
#[derive(Debug)]
pub struct Gate {
    max_delay: Duration,
    done: AtomicBool,
    notify: Notify,
}

impl Gate {
    pub fn new(max_delay: Duration) -> Self {
        Self {
            max_delay,
            done: AtomicBool::new(false),
            notify: Notify::new(),
        }
    }

    #[must_use]
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Mark the gate done and wake every waiter.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn signal(&self) -> bool {
        if self.done.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.notify.notify_waiters();
        true
    }

    /// Resolves once the gate is done, however long that takes.
    pub async fn signaled(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking the flag so a concurrent signal is not lost.
            notified.as_mut().enable();
            if self.is_done() {
                return;
            }
            notified.await;
        }
    }

    /// Wait until the gate is done or `race_start + max_delay` passes.
    ///
    /// Returns `true` when released by the signal, `false` on expiry.
    pub async fn wait_from(&self, race_start: Instant) -> bool {
        let deadline = race_start + self.max_delay;
        tokio::time::timeout_at(deadline, self.signaled())
            .await
            .is_ok()
    }
}
