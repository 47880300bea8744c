use spscbuf::RingError;
use thiserror::Error;

/// Destination copy failure during a read, the userspace analogue of a
/// `copy_to_user` fault.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("destination buffer fault")]
pub struct CopyFault;

#[derive(Error, Debug)]
pub enum DevError {
    /// The destination copy failed; no buffered byte was consumed.
    #[error("i/o fault copying to destination")]
    IoFault(#[from] CopyFault),

    /// The device models no data sink.
    #[error("write is not supported")]
    NotSupported,

    #[error(transparent)]
    Ring(#[from] RingError),
}

/// Activation is all-or-nothing: any of these tears down whatever was
/// already acquired before being returned.
#[derive(Error, Debug)]
pub enum ActivateError {
    #[error("capacity {0} is not a positive multiple of the 16-byte record")]
    CapacityNotAligned(usize),

    /// Occupancy tops out one record short of capacity, so a ring of
    /// exactly one record slot could never store anything.
    #[error("capacity {0} cannot buffer a record; at least two 16-byte slots are required")]
    CapacityTooSmall(usize),

    #[error("ring buffer setup failed")]
    Ring(#[from] RingError),

    #[error("failed to start interrupt delivery thread")]
    IrqThread(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AttrError {
    #[error("invalid integer input {0:?}")]
    InvalidInput(String),
}
