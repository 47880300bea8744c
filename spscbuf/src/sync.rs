#[cfg(not(feature = "loom"))]
pub use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

#[cfg(feature = "loom")]
pub use loom::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

#[cfg(not(feature = "loom"))]
pub mod notification {
    use crate::error::RingError;
    use nix::sys::eventfd::{EfdFlags, EventFd};
    use std::sync::Arc;

    /// Consumer wakeup channel. Cloned so the producer can signal and the
    /// consumer can wait on the same eventfd.
    #[derive(Clone)]
    pub struct Notification {
        eventfd: Arc<EventFd>,
    }

    impl Notification {
        pub fn new() -> Result<Self, RingError> {
            let eventfd = EventFd::from_value_and_flags(0, EfdFlags::EFD_CLOEXEC)
                .map_err(|e| RingError::EventfdCreation(e.to_string()))?;

            Ok(Notification {
                eventfd: Arc::new(eventfd),
            })
        }

        pub fn notify(&self) -> Result<(), RingError> {
            self.eventfd
                .write(1)
                .map_err(|e| RingError::EventfdWrite(e.to_string()))?;
            Ok(())
        }

        pub fn wait(&self) -> Result<(), RingError> {
            self.eventfd
                .read()
                .map_err(|e| RingError::EventfdRead(e.to_string()))?;
            Ok(())
        }
    }
}

#[cfg(feature = "loom")]
pub mod notification {
    use crate::error::RingError;
    use loom::sync::{Condvar, Mutex};
    use std::sync::Arc;

    #[derive(Clone)]
    pub struct Notification {
        inner: Arc<NotificationInner>,
    }

    struct NotificationInner {
        condvar: Condvar,
        mutex: Mutex<bool>,
    }

    impl Notification {
        pub fn new() -> Result<Self, RingError> {
            Ok(Notification {
                inner: Arc::new(NotificationInner {
                    condvar: Condvar::new(),
                    mutex: Mutex::new(false),
                }),
            })
        }

        pub fn notify(&self) -> Result<(), RingError> {
            let mut notified = self.inner.mutex.lock().unwrap();
            *notified = true;
            self.inner.condvar.notify_one();
            Ok(())
        }

        pub fn wait(&self) -> Result<(), RingError> {
            let mut notified = self.inner.mutex.lock().unwrap();
            while !*notified {
                notified = self.inner.condvar.wait(notified).unwrap();
            }
            *notified = false;
            Ok(())
        }
    }
}
