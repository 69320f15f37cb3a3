//! Arena lifecycle FFI: create, hook, init, enable, allocate, destroy.
//!
//! Each arena lives behind its own `Arc<HostArena>`, so the global `ARENAS`
//! table lock is only held for handle lookup. Inside, an `RwLock` keeps
//! setup (`init`, `enable`, hook installation) exclusive while
//! `cairn_arena_alloc` calls from different threads share the read side
//! and serialize only on the host's critical-section hooks.

use std::ffi::c_void;
use std::ptr;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use cairn_arena::{Arena, ArenaError};

use crate::handle::HandleTable;
use crate::hooks::{CairnLockFn, HostLock};
use crate::stats::CairnArenaStats;
use crate::status::CairnStatus;

struct HostArena {
    arena: RwLock<Arena<HostLock>>,
    last_status: AtomicI32,
}

impl HostArena {
    fn new() -> Self {
        Self {
            arena: RwLock::new(Arena::new(HostLock::default())),
            last_status: AtomicI32::new(CairnStatus::Ok as i32),
        }
    }

    fn record(&self, status: CairnStatus) {
        self.last_status.store(status as i32, Ordering::Relaxed);
    }

    /// Record `status` and hand back `value`, for early returns.
    fn fail<T>(&self, status: CairnStatus, value: T) -> T {
        self.record(status);
        value
    }

    fn settle<T>(&self, result: &Result<T, ArenaError>) -> bool {
        self.record(CairnStatus::from(result));
        result.is_ok()
    }
}

type ArenaArc = Arc<HostArena>;

static ARENAS: Mutex<HandleTable<ArenaArc>> = Mutex::new(HandleTable::new());

/// Clone the Arc for an arena handle, briefly locking the global table.
///
/// Returns `None` if the handle is invalid or the mutex is poisoned.
fn get_arena(handle: u64) -> Option<ArenaArc> {
    ARENAS.lock().ok()?.get(handle).cloned()
}

/// Create an uninitialized arena with no-op lock hooks.
///
/// On success, writes the handle to `arena_out` and returns `CAIRN_STATUS_OK`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn cairn_arena_create(arena_out: *mut u64) -> i32 {
    ffi_guard!({
        if arena_out.is_null() {
            return CairnStatus::InvalidArgument as i32;
        }
        let mut arenas = ffi_lock!(ARENAS);
        let handle = arenas.insert(Arc::new(HostArena::new()));
        tracing::debug!(handle, live = arenas.len(), "ffi arena created");
        // SAFETY: arena_out is non-null and valid for writes per caller contract.
        unsafe { *arena_out = handle };
        CairnStatus::Ok as i32
    })
}

/// Destroy an arena handle.
///
/// The region itself belongs to the caller and is not touched. Destroying
/// an already-destroyed handle returns `CAIRN_STATUS_INVALID_HANDLE`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn cairn_arena_destroy(arena_handle: u64) -> i32 {
    ffi_guard!({
        let mut arenas = ffi_lock!(ARENAS);
        match arenas.remove(arena_handle) {
            Some(_) => {
                tracing::debug!(handle = arena_handle, live = arenas.len(), "ffi arena destroyed");
                CairnStatus::Ok as i32
            }
            None => CairnStatus::InvalidHandle as i32,
        }
    })
}

/// Install the critical-section hooks bracketing every allocation.
///
/// Either hook may be null. Hooks can only be changed before
/// `cairn_arena_init`; afterwards this returns
/// `CAIRN_STATUS_ALREADY_INITIALIZED` and keeps the existing hooks.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn cairn_arena_set_lock_hooks(
    arena_handle: u64,
    acquire: CairnLockFn,
    release: CairnLockFn,
) -> i32 {
    ffi_guard!({
        let Some(host) = get_arena(arena_handle) else {
            return CairnStatus::InvalidHandle as i32;
        };
        let mut arena = ffi_lock!(write host.arena, CairnStatus::InternalError as i32);
        if arena.is_initialized() {
            return CairnStatus::AlreadyInitialized as i32;
        }
        *arena = Arena::new(HostLock::new(acquire, release));
        CairnStatus::Ok as i32
    })
}

/// Bind the arena to the `size` bytes at `region_start`.
///
/// `alignment` must be a non-zero power of two. Returns `false` on any
/// failure; `cairn_arena_last_status` says which. The arena starts
/// disabled.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn cairn_arena_init(
    arena_handle: u64,
    region_start: *mut u8,
    size: usize,
    alignment: usize,
) -> bool {
    ffi_guard_or!(false, {
        let Some(host) = get_arena(arena_handle) else {
            return false;
        };
        let mut arena = ffi_lock!(
            write host.arena,
            host.fail(CairnStatus::InternalError, false)
        );
        // Exposed so that returned block pointers can reclaim the region's
        // provenance from their addresses.
        let start = region_start.expose_provenance();
        host.settle(&arena.init(start, size, alignment))
    })
}

/// Switch allocation on or off. Fails before `cairn_arena_init`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn cairn_arena_enable(arena_handle: u64, enabled: bool) -> bool {
    ffi_guard_or!(false, {
        let Some(host) = get_arena(arena_handle) else {
            return false;
        };
        let mut arena = ffi_lock!(
            write host.arena,
            host.fail(CairnStatus::InternalError, false)
        );
        host.settle(&arena.enable(enabled))
    })
}

/// Bytes between the cursor and the end of the region.
///
/// Zero for an invalid handle or an uninitialized arena. Not synchronized
/// with concurrent allocations, so treat it as a hint.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn cairn_arena_available(arena_handle: u64) -> usize {
    ffi_guard_or!(0, {
        let Some(host) = get_arena(arena_handle) else {
            return 0;
        };
        let arena = ffi_lock!(read host.arena, 0);
        arena.available()
    })
}

/// Allocate `size` bytes, rounded up to the arena's alignment.
///
/// Returns null if the handle is invalid, the arena is not initialized
/// or not enabled, or the request does not fit. A zero-byte request
/// returns the current cursor without consuming space.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn cairn_arena_alloc(arena_handle: u64, size: usize) -> *mut c_void {
    ffi_guard_or!(ptr::null_mut(), {
        let Some(host) = get_arena(arena_handle) else {
            return ptr::null_mut();
        };
        let arena = ffi_lock!(
            read host.arena,
            host.fail(CairnStatus::InternalError, ptr::null_mut())
        );
        match arena.allocate(size) {
            Ok(block) => {
                host.record(CairnStatus::Ok);
                ptr::with_exposed_provenance_mut(block.addr())
            }
            Err(e) => host.fail(CairnStatus::from(&e), ptr::null_mut()),
        }
    })
}

/// Status of the most recent `init`, `enable` or `alloc` on this arena,
/// from any thread.
///
/// Returns `CAIRN_STATUS_INVALID_HANDLE` for an unknown handle.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn cairn_arena_last_status(arena_handle: u64) -> i32 {
    ffi_guard!({
        match get_arena(arena_handle) {
            Some(host) => host.last_status.load(Ordering::Relaxed),
            None => CairnStatus::InvalidHandle as i32,
        }
    })
}

/// Write the arena's usage counters to `stats_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn cairn_arena_stats(arena_handle: u64, stats_out: *mut CairnArenaStats) -> i32 {
    ffi_guard!({
        if stats_out.is_null() {
            return CairnStatus::InvalidArgument as i32;
        }
        let Some(host) = get_arena(arena_handle) else {
            return CairnStatus::InvalidHandle as i32;
        };
        let arena = ffi_lock!(read host.arena, CairnStatus::InternalError as i32);
        let stats = CairnArenaStats::from(&arena.stats());
        // SAFETY: stats_out is non-null and valid for writes per caller contract.
        unsafe { *stats_out = stats };
        CairnStatus::Ok as i32
    })
}
