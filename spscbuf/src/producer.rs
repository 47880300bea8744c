use crate::{
    common::unlikely,
    ringbuf::RingBuf,
    sync::{notification::Notification, Ordering},
    RingError,
};
use std::sync::Arc;
use tracing::trace;

/// Whether the producer wakes the consumer after each stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeupStrategy {
    Forced,
    NoWakeup,
}

/// Result of a publish attempt. A drop is not an error: the producer runs
/// in a context with no caller to return one to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Stored,
    Dropped,
}

/// The writing half. Sole writer of `head`.
pub struct Producer {
    ring: Arc<RingBuf>,
    notification: Notification,
    wakeup_strategy: WakeupStrategy,
}

impl Producer {
    pub(crate) fn from_parts(
        ring: Arc<RingBuf>,
        notification: Notification,
        wakeup_strategy: WakeupStrategy,
    ) -> Self {
        Producer {
            ring,
            notification,
            wakeup_strategy,
        }
    }

    /// Publish one record into the ring.
    ///
    /// Safe to call where blocking is forbidden: takes no lock, allocates
    /// nothing, and completes in time bounded by `record.len()`. When free
    /// space is insufficient the record is dropped and the drop counter
    /// incremented; bytes the consumer has not yet read are never
    /// overwritten. A record no shorter than the capacity can never fit
    /// and is dropped the same way.
    pub fn publish(&self, record: &[u8]) -> PublishOutcome {
        let capacity = self.ring.capacity();

        let head = self.ring.head(Ordering::Relaxed); // sole writer of head
        let tail = self.ring.tail(Ordering::Acquire);
        let occupied = self.ring.occupied(head, tail);

        // head == tail must keep meaning empty, so occupancy may never
        // reach capacity.
        if unlikely(occupied + record.len() >= capacity) {
            self.ring.increment_dropped();
            trace!(
                head,
                tail,
                len = record.len(),
                "ring full, record dropped"
            );
            return PublishOutcome::Dropped;
        }

        // Straddling case: split at the physical end of the arena.
        let first = record.len().min(capacity - head);
        self.ring.arena().copy_in(head, &record[..first]);
        if first < record.len() {
            self.ring.arena().copy_in(0, &record[first..]);
        }

        // Write-then-publish: the release store makes every byte above
        // visible to a consumer that acquires the new head.
        self.ring.publish_head(self.ring.advance(head, record.len()));
        trace!(head, len = record.len(), "record published");

        if matches!(self.wakeup_strategy, WakeupStrategy::Forced) {
            let _ = self.notification.notify();
        }
        PublishOutcome::Stored
    }

    /// Records dropped by the overflow policy since construction.
    pub fn dropped(&self) -> u64 {
        self.ring.dropped()
    }

    /// Manually wake the consumer. Useful with `WakeupStrategy::NoWakeup`
    /// to batch wakeups.
    pub fn notify(&self) -> Result<(), RingError> {
        self.notification.notify()
    }
}

impl Drop for Producer {
    /// Closing the ring is the cancellation path for a blocked consumer:
    /// it wakes up, drains what is left, and then observes end-of-stream.
    fn drop(&mut self) {
        self.ring.close();
        let _ = self.notification.notify();
    }
}
