//! # tickdev - interrupt-driven timestamped-record device
//!
//! Userspace model of a character device whose hardware interrupt appends
//! one fixed 16-byte timestamp record per delivery into a ring buffer, and
//! whose read path drains those records to callers.
//!
//! The hard part lives in the [`spscbuf`] crate: the producer runs in a
//! delivery context that must never block, the consumer in an ordinary
//! calling context that may, and the two coordinate only through
//! acquire/release index publication. This crate adds the device shape
//! around it: the fixed record format, the register-sampling interrupt
//! handler, file-style open/read/write operations, and a lifecycle with
//! all-or-nothing activation and quiescent teardown.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use tickdev::{Device, DeviceConfig, MockRegisters, ReadMode, RECORD_SIZE};
//!
//! let registers = Arc::new(MockRegisters::new());
//! let (device, trigger) = Device::activate(registers.clone(), DeviceConfig::default())?;
//!
//! // Hardware asserts its status bit, then the line fires.
//! registers.raise();
//! trigger.raise();
//!
//! let handle = device.open(ReadMode::Blocking);
//! let mut buf = [0u8; RECORD_SIZE];
//! let n = handle.read(&mut buf[..])?;
//! assert_eq!(n, RECORD_SIZE);
//! assert_eq!(buf[8], b'.');
//! assert_eq!(buf[15], b'\n');
//!
//! device.deactivate();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Teardown ordering
//!
//! [`Device::deactivate`] disables the interrupt line and joins the
//! delivery thread before anything else, so once it returns no handler
//! invocation is in flight. The ring arena is freed only after both the
//! producer and the consumer half are gone; a pending interrupt can
//! therefore never write into freed memory, by construction rather than
//! by timing.

pub use attr::IntAttr;
pub use device::{page_size, Device, DeviceConfig, Handle, ReadMode, UserBuf};
pub use error::{ActivateError, AttrError, CopyFault, DevError};
pub use hw::{MockRegisters, RegisterSource, STATUS_PENDING};
pub use irq::{handle_interrupt, IrqLine, IrqReturn, IrqTrigger};
pub use record::{format_record, Timestamp, RECORD_SIZE};

pub mod attr;
pub mod device;
pub mod error;
pub mod hw;
pub mod irq;
pub mod record;
