use crate::{
    ringbuf::RingBuf,
    sync::{notification::Notification, Ordering},
    RingError,
};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::trace;

/// The reading half. Sole writer of `tail`.
pub struct Consumer {
    ring: Arc<RingBuf>,
    notification: Notification,
}

impl Consumer {
    pub(crate) fn from_parts(ring: Arc<RingBuf>, notification: Notification) -> Self {
        Consumer { ring, notification }
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Bytes currently buffered. Equals total bytes produced minus total
    /// bytes consumed at every observation point.
    pub fn available(&self) -> usize {
        let head = self.ring.head(Ordering::Acquire);
        let tail = self.ring.tail(Ordering::Relaxed); // sole writer of tail
        self.ring.occupied(head, tail)
    }

    /// Drain up to `dst.len()` bytes into `dst`, returning the count.
    ///
    /// At most one contiguous run is drained per call; when the buffered
    /// bytes straddle the physical wrap point the remainder is left for a
    /// subsequent call. Returns 0 when nothing is buffered.
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        let max = dst.len();
        match self.consume_with(max, |bytes| {
            dst[..bytes.len()].copy_from_slice(bytes);
            Ok::<(), Infallible>(())
        }) {
            Ok(n) => n,
            Err(never) => match never {},
        }
    }

    /// Drain at most `max` bytes through `copy`, which is handed one
    /// contiguous in-order slice.
    ///
    /// `tail` advances only after `copy` returns `Ok`, so a failed copy
    /// leaves every byte buffered for the next read. The slice borrow is
    /// scoped to the call; no reference into the arena survives it.
    pub fn consume_with<E>(
        &mut self,
        max: usize,
        copy: impl FnOnce(&[u8]) -> Result<(), E>,
    ) -> Result<usize, E> {
        let head = self.ring.head(Ordering::Acquire);
        let tail = self.ring.tail(Ordering::Relaxed);
        let avail = self.ring.occupied(head, tail);
        if avail == 0 || max == 0 {
            return Ok(0);
        }

        let contiguous = avail.min(self.ring.capacity() - tail);
        let to_copy = max.min(contiguous);

        self.ring.arena().with_slice(tail, to_copy, copy)?;
        self.ring.publish_tail(self.ring.advance(tail, to_copy));
        trace!(tail, to_copy, "bytes consumed");
        Ok(to_copy)
    }

    /// Block until the producer publishes or closes. Holds no lock the
    /// producer could need.
    pub fn wait(&self) -> Result<(), RingError> {
        self.notification.wait()
    }

    /// True once the producer half has been dropped. Remaining buffered
    /// bytes stay readable after close.
    pub fn is_closed(&self) -> bool {
        self.ring.is_closed()
    }

    /// Records dropped by the overflow policy since construction.
    pub fn dropped(&self) -> u64 {
        self.ring.dropped()
    }
}
