//! Hardware register boundary: a read-only status window sampled once per
//! interrupt, abstracted so tests can substitute a deterministic fake.

use std::sync::atomic::{AtomicU32, Ordering};

/// Set when this device raised the interrupt. On a shared line the handler
/// must check this before claiming a delivery.
pub const STATUS_PENDING: u32 = 1 << 0;

/// Status window of the device.
///
/// `ack` clears the interrupt condition after a handled delivery; without
/// it a level-triggered line stays asserted and the handler is re-entered
/// forever.
pub trait RegisterSource: Send + Sync {
    /// One non-blocking status read.
    fn sample(&self) -> u32;

    /// Acknowledge the sampled status, deasserting the line.
    fn ack(&self, status: u32);
}

/// In-memory register block standing in for the memory-mapped window.
pub struct MockRegisters {
    status: AtomicU32,
}

impl MockRegisters {
    pub fn new() -> Self {
        MockRegisters {
            status: AtomicU32::new(0),
        }
    }

    /// Assert the interrupt condition, as the hardware would before
    /// raising the line.
    pub fn raise(&self) {
        self.status.fetch_or(STATUS_PENDING, Ordering::SeqCst);
    }

    pub fn set_status(&self, bits: u32) {
        self.status.store(bits, Ordering::SeqCst);
    }

    /// True while the interrupt condition is asserted; cleared by `ack`.
    pub fn is_pending(&self) -> bool {
        self.status.load(Ordering::SeqCst) & STATUS_PENDING != 0
    }
}

impl Default for MockRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterSource for MockRegisters {
    fn sample(&self) -> u32 {
        self.status.load(Ordering::SeqCst)
    }

    fn ack(&self, status: u32) {
        self.status
            .fetch_and(!(status & STATUS_PENDING), Ordering::SeqCst);
    }
}
