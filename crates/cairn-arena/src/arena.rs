//! The bump allocator state machine.
//!
//! [`Arena`] partitions a caller-owned address range. It moves through
//! three states and never returns to the first:
//!
//! ```text
//! Uninitialized ──init──▶ Disabled ◀──enable(false)── Enabled
//!                            └────────enable(true)───────▶
//! ```
//!
//! `allocate` is only served in `Enabled`. The cursor starts at the
//! region's aligned start and only moves forward; there is no free and no
//! reset.

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ArenaError;
use crate::handle::Block;
use crate::lock::{CriticalSection, NoLock, Section};
use crate::region::{align_up, Region};

/// Lifecycle state of an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArenaState {
    /// `init` has not succeeded yet.
    Uninitialized,
    /// Initialized, allocation switched off.
    Disabled,
    /// Initialized and serving allocations.
    Enabled,
}

/// Point-in-time usage counters for an [`Arena`].
///
/// Read without taking the lock, so under concurrent allocation the fields
/// may come from slightly different instants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Bytes usable after start padding.
    pub capacity: usize,
    /// Bytes handed out so far, including per-block padding.
    pub used: usize,
    /// Bytes still obtainable (`capacity - used`).
    pub available: usize,
    /// Successful allocations.
    pub allocations: usize,
    /// Allocations rejected for lack of space.
    pub failed: usize,
}

/// A fixed-region bump allocator.
///
/// The arena owns no memory. It hands out [`Block`]s describing
/// sub-ranges of the region given to [`init`](Arena::init); the caller
/// owns both the region and every block carved from it.
///
/// `init` and `enable` take `&mut self`, so setup is single-context by
/// construction. `allocate` takes `&self` and wraps the cursor
/// check-and-advance in `L`'s critical section, so several contexts may
/// allocate through a shared reference.
#[derive(Debug)]
pub struct Arena<L = NoLock> {
    region: Option<Region>,
    enabled: bool,
    cursor: AtomicUsize,
    allocations: AtomicUsize,
    failed: AtomicUsize,
    lock: L,
}

impl<L: Default> Default for Arena<L> {
    fn default() -> Self {
        Self::new(L::default())
    }
}

impl<L> Arena<L> {
    /// Create an uninitialized arena guarded by `lock`.
    pub const fn new(lock: L) -> Self {
        Self {
            region: None,
            enabled: false,
            cursor: AtomicUsize::new(0),
            allocations: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            lock,
        }
    }

    /// Create and initialize an arena in one step.
    ///
    /// The returned arena is still disabled.
    pub fn with_region(
        region_start: usize,
        size: usize,
        alignment: usize,
        lock: L,
    ) -> Result<Self, ArenaError> {
        let mut arena = Self::new(lock);
        arena.init(region_start, size, alignment)?;
        Ok(arena)
    }

    /// Bind the arena to `[region_start, region_start + size)`.
    ///
    /// The cursor is placed at `region_start` rounded up to `alignment`,
    /// and the arena starts disabled.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::AlreadyInitialized`] if a previous `init` succeeded.
    /// - [`ArenaError::InvalidArgument`] for a null start, zero size, zero or
    ///   non-power-of-two alignment, a region that wraps the address space,
    ///   or a region shorter than its own start padding.
    ///
    /// On error nothing is modified.
    pub fn init(
        &mut self,
        region_start: usize,
        size: usize,
        alignment: usize,
    ) -> Result<(), ArenaError> {
        if self.region.is_some() {
            return Err(ArenaError::AlreadyInitialized);
        }
        let region = Region::new(region_start, size, alignment)?;

        *self.cursor.get_mut() = region.aligned_start();
        self.enabled = false;
        self.region = Some(region);

        tracing::debug!(
            region_start,
            size,
            alignment,
            capacity = region.capacity(),
            "arena initialized"
        );
        Ok(())
    }

    /// Switch allocation on or off.
    ///
    /// Both directions are always permitted once initialized, including
    /// setting the flag to its current value.
    pub fn enable(&mut self, enabled: bool) -> Result<(), ArenaError> {
        if self.region.is_none() {
            return Err(ArenaError::NotReady);
        }
        if self.enabled != enabled {
            tracing::debug!(enabled, "arena allocation toggled");
        }
        self.enabled = enabled;
        Ok(())
    }

    /// Bytes between the cursor and the end of the region.
    ///
    /// Zero before `init`. This ignores padding a future request may need,
    /// so it is an upper bound on the next allocation, and it is read
    /// without the lock.
    pub fn available(&self) -> usize {
        match &self.region {
            Some(region) => region.end() - self.cursor.load(Ordering::Relaxed),
            None => 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ArenaState {
        match (self.region.is_some(), self.enabled) {
            (false, _) => ArenaState::Uninitialized,
            (true, false) => ArenaState::Disabled,
            (true, true) => ArenaState::Enabled,
        }
    }

    /// Whether `init` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.region.is_some()
    }

    /// Whether allocation is switched on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The region layout, once initialized.
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// Block alignment, once initialized.
    pub fn alignment(&self) -> Option<usize> {
        self.region.as_ref().map(Region::alignment)
    }

    /// Address of the next free byte, once initialized.
    pub fn cursor(&self) -> Option<usize> {
        self.region
            .as_ref()
            .map(|_| self.cursor.load(Ordering::Relaxed))
    }

    /// Bytes handed out so far, including per-block padding.
    pub fn used(&self) -> usize {
        match &self.region {
            Some(region) => self.cursor.load(Ordering::Relaxed) - region.aligned_start(),
            None => 0,
        }
    }

    /// Usage counters. All zero before `init`.
    pub fn stats(&self) -> ArenaStats {
        let Some(region) = &self.region else {
            return ArenaStats::default();
        };
        let cursor = self.cursor.load(Ordering::Relaxed);
        ArenaStats {
            capacity: region.capacity(),
            used: cursor - region.aligned_start(),
            available: region.end() - cursor,
            allocations: self.allocations.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }

    /// The critical-section capability this arena was built with.
    pub fn lock(&self) -> &L {
        &self.lock
    }
}

impl<L: CriticalSection> Arena<L> {
    /// Carve `size` bytes, rounded up to the alignment, off the region.
    ///
    /// Returns the block at the current cursor and advances the cursor
    /// past it. A zero-byte request yields an empty block at the cursor.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::NotReady`] before `init`.
    /// - [`ArenaError::Disabled`] while switched off.
    /// - [`ArenaError::OutOfMemory`] if the padded request does not fit.
    ///   The arena stays usable for smaller requests.
    ///
    /// The first two are reported without entering the critical section.
    pub fn allocate(&self, size: usize) -> Result<Block, ArenaError> {
        let region = self.region.as_ref().ok_or(ArenaError::NotReady)?;
        if !self.enabled {
            return Err(ArenaError::Disabled);
        }

        let Some(padded) = align_up(size, region.alignment()) else {
            self.failed.fetch_add(1, Ordering::Relaxed);
            return Err(ArenaError::OutOfMemory {
                requested: size,
                available: self.available(),
            });
        };

        let _section = Section::enter(&self.lock);
        let cursor = self.cursor.load(Ordering::Relaxed);
        let available = region.end() - cursor;
        if available < padded {
            self.failed.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(requested = padded, available, "arena allocation rejected");
            return Err(ArenaError::OutOfMemory {
                requested: padded,
                available,
            });
        }
        self.cursor.store(cursor + padded, Ordering::Relaxed);
        self.allocations.fetch_add(1, Ordering::Relaxed);

        Ok(Block::new(cursor, cursor - region.start(), padded))
    }
}
