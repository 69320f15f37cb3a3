//! Arena over an owned, aligned byte buffer.
//!
//! [`BufferArena`] is the hosted convenience: it allocates the backing
//! region itself and resolves [`Block`]s back into byte slices. The
//! allocation algorithm is the plain [`Arena`]; this type only adds
//! storage.

use crate::arena::{Arena, ArenaStats};
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::Block;
use crate::lock::{CriticalSection, NoLock};
use crate::raw::AlignedBuf;

/// A bump arena that owns its backing memory.
///
/// The buffer is aligned to `config.alignment`, so a non-zero
/// `start_offset` gives a reproducibly unaligned region start.
pub struct BufferArena<L = NoLock> {
    buf: AlignedBuf,
    arena: Arena<L>,
}

impl<L> BufferArena<L> {
    /// Allocate a zeroed buffer and initialize an arena over
    /// `buffer[config.start_offset..]`.
    ///
    /// The arena starts disabled, like [`Arena::init`].
    pub fn new(config: ArenaConfig, lock: L) -> Result<Self, ArenaError> {
        config.validate()?;
        let len = config.buffer_len().ok_or(ArenaError::InvalidArgument {
            reason: "start offset plus size overflows",
        })?;
        let buf = AlignedBuf::zeroed(len, config.alignment).ok_or(ArenaError::InvalidArgument {
            reason: "buffer layout is too large",
        })?;
        let arena = Arena::with_region(
            buf.addr() + config.start_offset,
            config.size,
            config.alignment,
            lock,
        )?;
        Ok(Self { buf, arena })
    }

    /// The underlying address-level arena.
    pub fn arena(&self) -> &Arena<L> {
        &self.arena
    }

    /// Switch allocation on or off. See [`Arena::enable`].
    pub fn enable(&mut self, enabled: bool) -> Result<(), ArenaError> {
        self.arena.enable(enabled)
    }

    /// Bytes still obtainable. See [`Arena::available`].
    pub fn available(&self) -> usize {
        self.arena.available()
    }

    /// Usage counters. See [`Arena::stats`].
    pub fn stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    /// Read the bytes of a block issued by this arena.
    ///
    /// Returns `None` for a block outside the issued part of the region.
    pub fn bytes(&self, block: &Block) -> Option<&[u8]> {
        let range = self.index_range(block)?;
        Some(&self.buf.as_slice()[range])
    }

    /// Mutable access to the bytes of a block issued by this arena.
    ///
    /// Returns `None` for a block outside the issued part of the region.
    pub fn bytes_mut(&mut self, block: &Block) -> Option<&mut [u8]> {
        let range = self.index_range(block)?;
        Some(&mut self.buf.as_mut_slice()[range])
    }

    fn index_range(&self, block: &Block) -> Option<core::ops::Range<usize>> {
        let region = self.arena.region()?;
        let cursor = self.arena.cursor()?;
        let end = block.addr().checked_add(block.len())?;
        if block.addr() < region.aligned_start() || end > cursor {
            return None;
        }
        let base = self.buf.addr();
        let start = block.addr() - base;
        Some(start..start + block.len())
    }
}

impl<L: CriticalSection> BufferArena<L> {
    /// Carve a block off the buffer. See [`Arena::allocate`].
    pub fn allocate(&self, size: usize) -> Result<Block, ArenaError> {
        self.arena.allocate(size)
    }

    /// Allocate `data.len()` bytes and copy `data` into them.
    pub fn allocate_copy(&mut self, data: &[u8]) -> Result<Block, ArenaError> {
        let block = self.arena.allocate(data.len())?;
        if let Some(dst) = self.bytes_mut(&block) {
            dst[..data.len()].copy_from_slice(data);
        }
        Ok(block)
    }
}

impl<L: core::fmt::Debug> core::fmt::Debug for BufferArena<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BufferArena")
            .field("buffer_len", &self.buf.len())
            .field("arena", &self.arena)
            .finish()
    }
}
