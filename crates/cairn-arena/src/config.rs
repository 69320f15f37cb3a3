//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for an owned-buffer arena ([`BufferArena`](crate::BufferArena)).
///
/// The borrowed-region [`Arena`](crate::Arena) takes the same three values
/// directly in [`Arena::init`](crate::Arena::init); this struct exists for
/// callers that want the crate to own the backing memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the managed region in bytes.
    ///
    /// Must be non-zero.
    pub size: usize,

    /// Required alignment of every block, in bytes.
    ///
    /// Default: 8. Must be a non-zero power of two.
    pub alignment: usize,

    /// Offset of the managed region from the start of the backing buffer.
    ///
    /// Default: 0. A non-zero offset produces an unaligned region start,
    /// which the arena pads up to `alignment` at init.
    pub start_offset: usize,
}

impl ArenaConfig {
    /// Default block alignment in bytes.
    pub const DEFAULT_ALIGNMENT: usize = 8;

    /// Create a config for a region of `size` bytes with default alignment.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            alignment: Self::DEFAULT_ALIGNMENT,
            start_offset: 0,
        }
    }

    /// Set the block alignment.
    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the region's offset into the backing buffer.
    pub fn with_start_offset(mut self, start_offset: usize) -> Self {
        self.start_offset = start_offset;
        self
    }

    /// Total backing buffer length: `start_offset + size`.
    ///
    /// Returns `None` on overflow.
    pub fn buffer_len(&self) -> Option<usize> {
        self.start_offset.checked_add(self.size)
    }

    /// Check the parameters the arena refuses at init.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.size == 0 {
            return Err(ArenaError::InvalidArgument {
                reason: "region size is zero",
            });
        }
        if self.alignment == 0 {
            return Err(ArenaError::InvalidArgument {
                reason: "alignment is zero",
            });
        }
        if !self.alignment.is_power_of_two() {
            return Err(ArenaError::InvalidArgument {
                reason: "alignment is not a power of two",
            });
        }
        if self.buffer_len().is_none() {
            return Err(ArenaError::InvalidArgument {
                reason: "start offset plus size overflows",
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
