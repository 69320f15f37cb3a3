//! Fixed-region bump allocation for embedded and bare-metal targets.
//!
//! An [`Arena`] partitions one caller-supplied contiguous region by
//! advancing a cursor. Blocks are never freed individually and the arena
//! is never reset: once the region is exhausted, only requests that still
//! fit succeed. This crate is `no_std` when built without the `std`
//! feature.
//!
//! # Architecture
//!
//! ```text
//! Arena<L: CriticalSection>      (address-level state machine)
//! ├── Region                     (start, end, alignment; fixed at init)
//! ├── cursor: AtomicUsize        (advanced inside L's critical section)
//! └── L                          (NoLock | SpinLock | HookLock | user impl)
//!
//! BufferArena<L>                 (feature "alloc")
//! ├── AlignedBuf                 (owned, zeroed, aligned backing memory)
//! └── Arena<L>                   (over a sub-range of the buffer)
//! ```
//!
//! # Lifecycle
//!
//! 1. `Arena::new(lock)` creates an uninitialized arena.
//! 2. `init(start, size, alignment)` binds the region; the arena is disabled.
//! 3. `enable(true)` switches allocation on.
//! 4. `allocate(size)` returns a [`Block`] or an [`ArenaError`].
//!
//! ```
//! use cairn_arena::{Arena, NoLock};
//!
//! let mut backing = [0u64; 4];
//! let start = backing.as_mut_ptr() as usize;
//!
//! let mut arena = Arena::new(NoLock);
//! arena.init(start, 32, 8).unwrap();
//! arena.enable(true).unwrap();
//!
//! let block = arena.allocate(5).unwrap();
//! assert_eq!(block.addr(), start);
//! assert_eq!(block.len(), 8);
//! assert_eq!(arena.available(), 24);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod arena;
#[cfg(feature = "alloc")]
pub mod buffer;
pub mod config;
pub mod error;
pub mod handle;
pub mod lock;
#[cfg(feature = "alloc")]
mod raw;
pub mod region;

// Public re-exports for the primary API surface.
pub use arena::{Arena, ArenaState, ArenaStats};
#[cfg(feature = "alloc")]
pub use buffer::BufferArena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::Block;
pub use lock::{CriticalSection, HookLock, NoLock, Section, SpinLock};
pub use region::Region;
