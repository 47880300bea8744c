//! Common internal types and utilities for spscbuf.

use crate::sync::{AtomicBool, AtomicU64, AtomicUsize};
use crossbeam::utils::CachePadded;

#[inline]
#[cold]
fn cold() {}

#[allow(unused)]
#[inline(always)]
pub(crate) fn likely(b: bool) -> bool {
    if !b {
        cold();
    }
    b
}

#[inline(always)]
pub(crate) fn unlikely(b: bool) -> bool {
    if b {
        cold();
    }
    b
}

/// Indices shared between the two halves. `head` has exactly one writer
/// (the producer) and `tail` exactly one writer (the consumer); both stay
/// within `[0, capacity)`.
pub(crate) struct Shared {
    pub(crate) head: CachePadded<AtomicUsize>,
    pub(crate) tail: CachePadded<AtomicUsize>,
    pub(crate) dropped: AtomicU64,
    pub(crate) closed: AtomicBool,
}

impl Shared {
    pub(crate) fn new() -> Self {
        Shared {
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
            dropped: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }
}
