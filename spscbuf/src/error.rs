use thiserror::Error;

#[derive(Error, Debug)]
pub enum RingError {
    #[error("capacity must be non-zero")]
    ZeroCapacity,

    #[error("failed to allocate {0}-byte arena")]
    AllocationFailed(usize),

    #[error("eventfd creation failed: {0}")]
    EventfdCreation(String),

    #[error("eventfd write failed: {0}")]
    EventfdWrite(String),

    #[error("eventfd read failed: {0}")]
    EventfdRead(String),
}
