//! Single-integer show/store attribute, the sysfs kind. No concurrency
//! story beyond an atomic cell.

use crate::error::AttrError;
use std::sync::atomic::{AtomicI64, Ordering};

pub struct IntAttr {
    value: AtomicI64,
}

impl IntAttr {
    pub fn new(initial: i64) -> Self {
        IntAttr {
            value: AtomicI64::new(initial),
        }
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Render the value as an attribute file would show it.
    pub fn show(&self) -> String {
        format!("{}\n", self.get())
    }

    /// Parse and store a decimal integer; surrounding whitespace (and the
    /// trailing newline a writer typically sends) is accepted.
    pub fn store(&self, buf: &str) -> Result<(), AttrError> {
        let parsed = buf
            .trim()
            .parse::<i64>()
            .map_err(|_| AttrError::InvalidInput(buf.trim().to_string()))?;
        self.value.store(parsed, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_store_roundtrip() {
        let attr = IntAttr::new(0);
        assert_eq!(attr.show(), "0\n");

        attr.store("42\n").unwrap();
        assert_eq!(attr.get(), 42);
        assert_eq!(attr.show(), "42\n");

        attr.store("  -7  ").unwrap();
        assert_eq!(attr.show(), "-7\n");
    }

    #[test]
    fn test_store_rejects_garbage() {
        let attr = IntAttr::new(3);
        assert!(attr.store("not a number").is_err());
        assert_eq!(attr.get(), 3, "failed store must not change the value");
    }
}
