use crate::error::RingError;
use core::ptr::NonNull;
use std::alloc::{alloc_zeroed, dealloc, Layout};

const ARENA_ALIGN: usize = 64;

/// Fixed-size byte block backing the ring. The arena owns its memory
/// exclusively; interior bytes are reachable only through the bounded copy
/// operations below, never through a raw pointer handed out to callers.
pub(crate) struct Arena {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl Arena {
    pub(crate) fn new(size: usize) -> Result<Self, RingError> {
        if size == 0 {
            return Err(RingError::ZeroCapacity);
        }
        let layout = Layout::from_size_align(size, ARENA_ALIGN)
            .map_err(|_| RingError::AllocationFailed(size))?;
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(raw).ok_or(RingError::AllocationFailed(size))?;
        Ok(Arena { ptr, layout })
    }

    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }

    /// Copy `src` into the arena at `offset`. Callers guarantee the range
    /// lies inside the arena and does not overlap unread bytes.
    pub(crate) fn copy_in(&self, offset: usize, src: &[u8]) {
        assert!(offset + src.len() <= self.len());
        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), self.ptr.as_ptr().add(offset), src.len());
        }
    }

    /// Copy `dst.len()` bytes out of the arena starting at `offset`.
    pub(crate) fn copy_out(&self, offset: usize, dst: &mut [u8]) {
        assert!(offset + dst.len() <= self.len());
        unsafe {
            std::ptr::copy_nonoverlapping(self.ptr.as_ptr().add(offset), dst.as_mut_ptr(), dst.len());
        }
    }

    /// Borrow `len` bytes at `offset` for the duration of `f`. The borrow
    /// cannot outlive the call, so no reference into the arena survives a
    /// reentry of the ring.
    pub(crate) fn with_slice<R>(&self, offset: usize, len: usize, f: impl FnOnce(&[u8]) -> R) -> R {
        assert!(offset + len <= self.len());
        let slice = unsafe { std::slice::from_raw_parts(self.ptr.as_ptr().add(offset), len) };
        f(slice)
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

unsafe impl Send for Arena {}
unsafe impl Sync for Arena {}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::Result;

    #[test]
    fn test_copy_in_out_roundtrip() -> Result<()> {
        let arena = Arena::new(256)?;

        let pattern: Vec<u8> = (0..256).map(|i| (i % 256) as u8).collect();
        arena.copy_in(0, &pattern);

        let mut out = vec![0u8; 256];
        arena.copy_out(0, &mut out);
        assert_eq!(out, pattern);

        Ok(())
    }

    #[test]
    fn test_zeroed_on_allocation() -> Result<()> {
        let arena = Arena::new(64)?;
        let mut out = vec![0xffu8; 64];
        arena.copy_out(0, &mut out);
        assert!(out.iter().all(|&b| b == 0));
        Ok(())
    }

    #[test]
    fn test_with_slice_sees_written_bytes() -> Result<()> {
        let arena = Arena::new(64)?;
        arena.copy_in(10, b"ABCDEFGH");

        let got = arena.with_slice(10, 8, |bytes| bytes.to_vec());
        assert_eq!(got, b"ABCDEFGH");

        Ok(())
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(Arena::new(0), Err(RingError::ZeroCapacity)));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_copy_panics() {
        let arena = Arena::new(16).unwrap();
        arena.copy_in(10, b"ABCDEFGH");
    }
}
