//! Device lifecycle and file operations: all-or-nothing activation, the
//! process-context read path, and quiescent teardown.

use crate::attr::IntAttr;
use crate::error::{ActivateError, CopyFault, DevError};
use crate::hw::RegisterSource;
use crate::irq::{IrqLine, IrqTrigger};
use crate::record::RECORD_SIZE;
use parking_lot::Mutex;
use spscbuf::{pair, Consumer, WakeupStrategy};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Destination of a read. Mirrors a user-space buffer: the copy itself may
/// fault, in which case the buffered bytes stay unread.
pub trait UserBuf {
    /// Capacity of the destination in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy `src` into the destination. Must either accept all of `src` or
    /// fail with no effect observable by the device.
    fn copy_from(&mut self, src: &[u8]) -> Result<(), CopyFault>;
}

impl UserBuf for [u8] {
    fn len(&self) -> usize {
        self.len()
    }

    fn copy_from(&mut self, src: &[u8]) -> Result<(), CopyFault> {
        self[..src.len()].copy_from_slice(src);
        Ok(())
    }
}

/// How a handle behaves when no data is buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    #[default]
    Blocking,
    NonBlocking,
}

#[derive(Debug, Clone, Copy)]
pub struct DeviceConfig {
    /// Ring capacity in bytes. Fixed at activation; must be a multiple of
    /// [`RECORD_SIZE`] no smaller than two records. Defaults to one
    /// memory page.
    pub capacity: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            capacity: page_size(),
        }
    }
}

pub fn page_size() -> usize {
    unsafe { libc::sysconf(libc::_SC_PAGESIZE) as usize }
}

/// The single shared device instance behind every open handle.
pub struct Device {
    reader: Mutex<Consumer>,
    irq: Mutex<Option<IrqLine>>,
    drops_reported: AtomicU64,
    attr: IntAttr,
}

impl Device {
    /// Activate the device: allocate the arena, wire the interrupt handler
    /// to a delivery line, and hand back the trigger.
    ///
    /// All-or-nothing: the first failure tears down everything already
    /// acquired and activation fails as a whole.
    pub fn activate(
        registers: Arc<dyn RegisterSource>,
        config: DeviceConfig,
    ) -> Result<(Arc<Device>, IrqTrigger), ActivateError> {
        if config.capacity == 0 || config.capacity % RECORD_SIZE != 0 {
            return Err(ActivateError::CapacityNotAligned(config.capacity));
        }
        // A single-slot ring can never store a record: occupancy tops out
        // at capacity - RECORD_SIZE.
        if config.capacity < 2 * RECORD_SIZE {
            return Err(ActivateError::CapacityTooSmall(config.capacity));
        }

        let (producer, consumer) = pair(config.capacity, WakeupStrategy::Forced)?;
        let (irq, trigger) =
            IrqLine::request(producer, registers).map_err(ActivateError::IrqThread)?;

        info!(capacity = config.capacity, "device activated");
        let device = Arc::new(Device {
            reader: Mutex::new(consumer),
            irq: Mutex::new(Some(irq)),
            drops_reported: AtomicU64::new(0),
            attr: IntAttr::new(0),
        });
        Ok((device, trigger))
    }

    /// Bind a handle to the device. There is no per-open state beyond the
    /// binding and the chosen read mode.
    pub fn open(self: &Arc<Self>, mode: ReadMode) -> Handle {
        Handle {
            device: Arc::clone(self),
            mode,
        }
    }

    /// Deactivate: disable the interrupt line first, wait for in-flight
    /// delivery to finish, then let the closed ring wake blocked readers.
    /// Idempotent. The arena itself is freed only when the last half of
    /// the ring drops, so it can never be freed under an in-flight write.
    pub fn deactivate(&self) {
        if let Some(line) = self.irq.lock().take() {
            line.free();
            info!("device deactivated");
        }
    }

    /// Records lost to the overflow policy since activation.
    pub fn dropped_records(&self) -> u64 {
        self.reader.lock().dropped()
    }

    /// The device's sysfs-style scratch attribute.
    pub fn attr(&self) -> &IntAttr {
        &self.attr
    }

    fn read_into<B: UserBuf + ?Sized>(&self, dst: &mut B, mode: ReadMode) -> Result<usize, DevError> {
        let count = dst.len();
        if count == 0 {
            return Ok(0);
        }
        // Serializes concurrent readers; the producer never takes this
        // lock, so holding it across the wait below cannot block delivery.
        let mut reader = self.reader.lock();
        loop {
            let n = reader.consume_with(count, |bytes| dst.copy_from(bytes))?;
            self.report_drops(&reader);
            if n > 0 {
                return Ok(n);
            }
            if matches!(mode, ReadMode::NonBlocking) {
                return Ok(0);
            }
            if reader.is_closed() {
                return Ok(0);
            }
            reader.wait()?;
        }
    }

    // Drops are counted in delivery context but reported here, where
    // logging is allowed.
    fn report_drops(&self, reader: &Consumer) {
        let dropped = reader.dropped();
        let seen = self.drops_reported.swap(dropped, Ordering::Relaxed);
        if dropped > seen {
            warn!(
                new = dropped - seen,
                total = dropped,
                "records dropped since last read"
            );
        }
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// Per-open binding to the shared device. Releasing a handle is just
/// dropping it; there is nothing to free.
pub struct Handle {
    device: Arc<Device>,
    mode: ReadMode,
}

impl Handle {
    /// Read buffered record bytes into `dst`.
    ///
    /// Returns at most one contiguous run per call. With no data buffered
    /// a non-blocking handle returns `Ok(0)` immediately; a blocking
    /// handle suspends until the next record is published, or returns
    /// `Ok(0)` once the device has been deactivated. A faulting `dst`
    /// yields [`DevError::IoFault`] and consumes nothing.
    ///
    /// Reads are serialized across all handles of a device, so
    /// [`ReadMode::NonBlocking`] governs only the empty-ring case: a
    /// non-blocking read still waits its turn behind another handle's
    /// in-progress read, including a blocking one suspended in its wait.
    pub fn read<B: UserBuf + ?Sized>(&self, dst: &mut B) -> Result<usize, DevError> {
        self.device.read_into(dst, self.mode)
    }

    /// The device models no data sink; writes are rejected rather than
    /// silently discarded.
    pub fn write(&self, _src: &[u8]) -> Result<usize, DevError> {
        Err(DevError::NotSupported)
    }

    pub fn device(&self) -> &Arc<Device> {
        &self.device
    }
}
