//! Block handles returned by the allocator.
//!
//! A [`Block`] records where an allocation landed: its absolute address,
//! its offset from the start of the region, and its padded length. The
//! arena keeps no record of issued blocks; the handle is the only trace.

use core::fmt;
use core::ops::Range;

/// Location of an allocation within an arena's region.
///
/// `len` is the padded length, always a multiple of the arena's alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Block {
    /// Absolute address of the first byte.
    pub(crate) addr: usize,
    /// Byte offset from the region start.
    pub(crate) offset: usize,
    /// Padded length in bytes.
    pub(crate) len: usize,
}

impl Block {
    pub(crate) fn new(addr: usize, offset: usize, len: usize) -> Self {
        Self { addr, offset, len }
    }

    /// Absolute address of the first byte.
    pub fn addr(&self) -> usize {
        self.addr
    }

    /// Byte offset from the start of the region passed to `init`.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Padded length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length block.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Address range `[addr, addr + len)` covered by this block.
    pub fn addr_range(&self) -> Range<usize> {
        self.addr..self.addr + self.len
    }

    /// Whether two blocks share at least one byte.
    pub fn overlaps(&self, other: &Block) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.addr < other.addr + other.len
            && other.addr < self.addr + self.len
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block(addr={:#x}, off={}, len={})",
            self.addr, self.offset, self.len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let b = Block::new(0x1004, 4, 8);
        assert_eq!(b.addr(), 0x1004);
        assert_eq!(b.offset(), 4);
        assert_eq!(b.len(), 8);
        assert!(!b.is_empty());
        assert_eq!(b.addr_range(), 0x1004..0x100c);
    }

    #[test]
    fn adjacent_blocks_do_not_overlap() {
        let a = Block::new(0x1000, 0, 4);
        let b = Block::new(0x1004, 4, 4);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn intersecting_blocks_overlap() {
        let a = Block::new(0x1000, 0, 8);
        let b = Block::new(0x1004, 4, 8);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn empty_block_overlaps_nothing() {
        let a = Block::new(0x1000, 0, 8);
        let e = Block::new(0x1004, 4, 0);
        assert!(e.is_empty());
        assert!(!a.overlaps(&e));
    }
}
