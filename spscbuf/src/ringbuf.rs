use crate::{arena::Arena, common::Shared, error::RingError, sync::Ordering};

/// Shared ring state: the arena plus the two indices. The producer owns
/// `head`, the consumer owns `tail`; neither context ever writes the
/// other's index.
pub(crate) struct RingBuf {
    arena: Arena,
    shared: Shared,
}

impl RingBuf {
    pub(crate) fn new(capacity: usize) -> Result<Self, RingError> {
        Ok(RingBuf {
            arena: Arena::new(capacity)?,
            shared: Shared::new(),
        })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.arena.len()
    }

    pub(crate) fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Single-lap wrap of `index + delta`. This is not a general modulo:
    /// it is only correct because every caller bounds `delta` by either one
    /// record length or the currently available byte count, both strictly
    /// below capacity.
    pub(crate) fn advance(&self, index: usize, delta: usize) -> usize {
        debug_assert!(index < self.capacity());
        debug_assert!(delta < self.capacity());
        let new = index + delta;
        if new >= self.capacity() {
            new - self.capacity()
        } else {
            new
        }
    }

    /// Logical occupied byte count for a head/tail snapshot.
    pub(crate) fn occupied(&self, head: usize, tail: usize) -> usize {
        (head + self.capacity() - tail) % self.capacity()
    }

    pub(crate) fn head(&self, order: Ordering) -> usize {
        self.shared.head.load(order)
    }

    pub(crate) fn tail(&self, order: Ordering) -> usize {
        self.shared.tail.load(order)
    }

    /// Publish a new head. Release ordering makes every arena byte written
    /// before this store visible to a consumer that acquires the new value.
    pub(crate) fn publish_head(&self, head: usize) {
        self.shared.head.store(head, Ordering::Release);
    }

    /// Publish a new tail, releasing the drained range back to the
    /// producer's free-space computation.
    pub(crate) fn publish_tail(&self, tail: usize) {
        self.shared.tail.store(tail, Ordering::Release);
    }

    pub(crate) fn increment_dropped(&self) {
        self.shared.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }

    pub(crate) fn close(&self) {
        self.shared.closed.store(true, Ordering::Release);
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }
}
