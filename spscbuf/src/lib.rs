//! # spscbuf - Single-Producer Single-Consumer Ring Buffer
//!
//! Byte-oriented ring buffer for exactly one producer and one consumer,
//! modeled on the Linux kernel's interrupt-to-read-path buffering discipline.
//! The producer side is safe to call from a context that must never block
//! (no locks, no allocation, bounded time); the consumer side may block on
//! an eventfd until data arrives.
//!
//! The producer is the sole writer of the head index and the consumer the
//! sole writer of the tail index, so the two sides need no lock between
//! them. Record bytes are published with a release store of `head` and
//! observed with an acquire load, which guarantees a consumer never sees
//! bytes whose write is still in flight.
//!
//! ## Creating a pair
//!
//! ```rust
//! use spscbuf::{pair, WakeupStrategy};
//!
//! let (producer, _consumer) = pair(4096, WakeupStrategy::Forced)?;
//! # Ok::<(), spscbuf::RingError>(())
//! ```
//!
//! ## Publishing records
//!
//! [`Producer::publish`] copies one record into the ring, splitting it
//! across the physical wrap point when needed. When free space is
//! insufficient the record is dropped and counted; buffered bytes are
//! never overwritten:
//!
//! ```rust
//! use spscbuf::{pair, PublishOutcome, WakeupStrategy};
//!
//! let (producer, _consumer) = pair(4096, WakeupStrategy::Forced)?;
//! let outcome = producer.publish(b"00001234.000056\n");
//! assert_eq!(outcome, PublishOutcome::Stored);
//! # Ok::<(), spscbuf::RingError>(())
//! ```
//!
//! ## Draining
//!
//! [`Consumer::read`] drains at most one contiguous run per call; a record
//! straddling the wrap point is observed as two reads whose concatenation
//! reproduces the original bytes:
//!
//! ```rust
//! use spscbuf::{pair, WakeupStrategy};
//!
//! let (producer, mut consumer) = pair(4096, WakeupStrategy::Forced)?;
//! producer.publish(b"00001234.000056\n");
//!
//! let mut buf = [0u8; 64];
//! let n = consumer.read(&mut buf);
//! assert_eq!(&buf[..n], b"00001234.000056\n");
//! # Ok::<(), spscbuf::RingError>(())
//! ```
//!
//! ## Blocking
//!
//! ```rust,no_run
//! use spscbuf::{pair, WakeupStrategy};
//!
//! let (producer, mut consumer) = pair(4096, WakeupStrategy::Forced)?;
//! let mut buf = [0u8; 64];
//! loop {
//!     let n = consumer.read(&mut buf);
//!     if n == 0 {
//!         if consumer.is_closed() {
//!             break;
//!         }
//!         consumer.wait()?; // block until the producer notifies
//!     }
//! }
//! # Ok::<(), spscbuf::RingError>(())
//! ```
//!
//! Dropping the [`Producer`] closes the ring and wakes a waiting consumer,
//! which is how a blocked read is cancelled on teardown.

pub use consumer::Consumer;
pub use error::RingError;
pub use producer::{Producer, PublishOutcome, WakeupStrategy};

pub(crate) mod arena;
pub(crate) mod common;
pub mod consumer;
pub mod error;
#[cfg(all(test, feature = "loom"))]
pub(crate) mod loom;
pub mod producer;
pub(crate) mod ringbuf;
pub(crate) mod sync;

use ringbuf::RingBuf;
use std::sync::Arc;
use sync::notification::Notification;

/// Create a connected producer/consumer pair over a fixed-capacity arena.
///
/// The arena is allocated once here and freed once both halves are dropped.
pub fn pair(
    capacity: usize,
    wakeup_strategy: WakeupStrategy,
) -> Result<(Producer, Consumer), RingError> {
    let ring = Arc::new(RingBuf::new(capacity)?);
    let notification = Notification::new()?;
    let producer = Producer::from_parts(Arc::clone(&ring), notification.clone(), wakeup_strategy);
    let consumer = Consumer::from_parts(ring, notification);
    Ok((producer, consumer))
}
