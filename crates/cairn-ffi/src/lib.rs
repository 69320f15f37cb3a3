//! C FFI bindings for the Cairn bump allocator.
//!
//! Exposes a C-compatible API over [`cairn_arena::Arena`]. Arenas are
//! addressed by `u64` handles; the host supplies the memory region and,
//! optionally, a pair of acquire/release hooks for the critical section.
//!
//! Functions that mirror the allocator's own boolean / pointer contract
//! (`init`, `enable`, `available`, `alloc`) keep those sentinels and
//! record the precise reason for a failure, readable afterwards through
//! [`arena::cairn_arena_last_status`]. Lifecycle functions return a
//! [`status::CairnStatus`] code directly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an FFI body, converting a panic into [`status::CairnStatus::Panicked`].
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!($crate::status::CairnStatus::Panicked as i32, $body)
    };
}

/// Run an FFI body, returning `$fallback` if it panics.
///
/// For entry points whose return type cannot carry a status code.
macro_rules! ffi_guard_or {
    ($fallback:expr, $body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(_) => {
                ::tracing::error!("panic caught at the cairn FFI boundary");
                $fallback
            }
        }
    };
}

/// Acquire a lock guard or return early if the lock is poisoned.
///
/// `ffi_lock!(m)` locks a `Mutex` and returns `InternalError` on poison.
/// `ffi_lock!(read rw, fallback)` / `ffi_lock!(write rw, fallback)` take
/// one side of an `RwLock` and return `fallback` on poison.
macro_rules! ffi_lock {
    (read $rw:expr, $fallback:expr) => {
        match $rw.read() {
            Ok(guard) => guard,
            Err(_) => return $fallback,
        }
    };
    (write $rw:expr, $fallback:expr) => {
        match $rw.write() {
            Ok(guard) => guard,
            Err(_) => return $fallback,
        }
    };
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::CairnStatus::InternalError as i32,
        }
    };
}

pub mod arena;
mod handle;
pub mod hooks;
pub mod stats;
pub mod status;

pub use arena::{
    cairn_arena_alloc, cairn_arena_available, cairn_arena_create, cairn_arena_destroy,
    cairn_arena_enable, cairn_arena_init, cairn_arena_last_status, cairn_arena_set_lock_hooks,
    cairn_arena_stats,
};
pub use hooks::CairnLockFn;
pub use stats::CairnArenaStats;
pub use status::CairnStatus;
