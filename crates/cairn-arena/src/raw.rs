//! Low-level primitives for arena memory operations.
//!
//! Holds the crate's only `unsafe` code: an owned, zeroed heap allocation
//! with a caller-chosen alignment, backing [`BufferArena`](crate::BufferArena).
//! `Box<[u8]>` cannot express alignments above 1, so the layout is managed
//! by hand here.

#![allow(unsafe_code)]

use alloc::alloc::{alloc_zeroed, dealloc, handle_alloc_error, Layout};
use core::ptr::NonNull;
use core::slice;

/// A zero-initialised heap buffer aligned to `layout.align()`.
pub(crate) struct AlignedBuf {
    ptr: NonNull<u8>,
    layout: Layout,
}

// SAFETY: AlignedBuf uniquely owns its allocation, like Box<[u8]>. Shared
// access only yields `&[u8]`; mutation requires `&mut self`.
unsafe impl Send for AlignedBuf {}
// SAFETY: see above.
unsafe impl Sync for AlignedBuf {}

impl AlignedBuf {
    /// Allocate `len` zeroed bytes aligned to `align`.
    ///
    /// Returns `None` if `len` is zero or the layout is invalid (alignment
    /// not a power of two, or size overflowing `isize` once rounded).
    pub(crate) fn zeroed(len: usize, align: usize) -> Option<Self> {
        let layout = Layout::from_size_align(len, align).ok()?;
        if layout.size() == 0 {
            return None;
        }
        // SAFETY: layout has non-zero size, checked above.
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr = match NonNull::new(raw) {
            Some(p) => p,
            None => handle_alloc_error(layout),
        };
        Some(Self { ptr, layout })
    }

    /// Address of the first byte.
    pub(crate) fn addr(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    /// Length in bytes.
    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr is valid for layout.size() initialised bytes for the
        // lifetime of self, and no `&mut` alias exists while `&self` is held.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.layout.size()) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as for as_slice, with exclusivity guaranteed by `&mut self`.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()) }
    }
}

impl Drop for AlignedBuf {
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc_zeroed with this exact layout and
        // has not been freed.
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_aligned_and_zeroed() {
        for align in [1, 2, 8, 64, 4096] {
            let buf = AlignedBuf::zeroed(100, align).unwrap();
            assert_eq!(buf.addr() % align, 0);
            assert_eq!(buf.len(), 100);
            assert!(buf.as_slice().iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn writes_are_visible() {
        let mut buf = AlignedBuf::zeroed(16, 8).unwrap();
        buf.as_mut_slice()[3] = 0xAB;
        assert_eq!(buf.as_slice()[3], 0xAB);
    }

    #[test]
    fn zero_length_and_bad_alignment_are_refused() {
        assert!(AlignedBuf::zeroed(0, 8).is_none());
        assert!(AlignedBuf::zeroed(16, 3).is_none());
    }
}
