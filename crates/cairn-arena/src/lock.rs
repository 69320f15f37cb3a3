//! Critical-section capability guarding the cursor update.
//!
//! The allocator never decides how mutual exclusion is achieved. Bare-metal
//! targets mask interrupts, RTOS ports take a mutex, hosted builds spin.
//! Each of these is a [`CriticalSection`] passed to the arena at
//! construction.

use core::sync::atomic::{AtomicBool, Ordering};

/// A short, non-blocking mutual-exclusion window.
///
/// `acquire` and `release` are always called in matched pairs on the same
/// execution context. Implementations need not be reentrant: the arena
/// never nests sections.
pub trait CriticalSection {
    /// Enter the critical section.
    fn acquire(&self);

    /// Leave the critical section.
    fn release(&self);
}

impl<L: CriticalSection + ?Sized> CriticalSection for &L {
    fn acquire(&self) {
        (**self).acquire()
    }

    fn release(&self) {
        (**self).release()
    }
}

/// RAII guard: acquires on [`enter`](Section::enter), releases on drop.
///
/// Release therefore runs on every exit path, including early returns and
/// unwinding.
#[must_use = "the section is released as soon as the guard is dropped"]
pub struct Section<'a, L: CriticalSection + ?Sized> {
    lock: &'a L,
}

impl<'a, L: CriticalSection + ?Sized> Section<'a, L> {
    /// Acquire `lock` for the lifetime of the returned guard.
    pub fn enter(lock: &'a L) -> Self {
        lock.acquire();
        Self { lock }
    }
}

impl<L: CriticalSection + ?Sized> Drop for Section<'_, L> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

/// No-op lock for single-context use.
///
/// This is the default. It is correct only when allocations never race:
/// a single thread with no allocating interrupt handlers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoLock;

impl CriticalSection for NoLock {
    #[inline]
    fn acquire(&self) {}

    #[inline]
    fn release(&self) {}
}

/// Test-and-set spin lock for hosted or multi-core targets.
#[derive(Debug, Default)]
pub struct SpinLock {
    locked: AtomicBool,
}

impl SpinLock {
    /// Create an unlocked spin lock.
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Whether some context currently holds the lock.
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

impl CriticalSection for SpinLock {
    fn acquire(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.locked.load(Ordering::Relaxed) {
                core::hint::spin_loop();
            }
        }
    }

    fn release(&self) {
        self.locked.store(false, Ordering::Release);
    }
}

/// Lock built from a pair of plain function hooks.
///
/// Suits platforms whose critical section is a global operation, such as
/// `cpsid i` / `cpsie i` on Cortex-M:
///
/// ```
/// use cairn_arena::lock::HookLock;
///
/// fn mask_irqs() {}
/// fn unmask_irqs() {}
///
/// let lock = HookLock::new(mask_irqs, unmask_irqs);
/// # let _ = lock;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct HookLock {
    acquire: fn(),
    release: fn(),
}

fn noop() {}

impl HookLock {
    /// Create a lock that calls `acquire` on entry and `release` on exit.
    pub const fn new(acquire: fn(), release: fn()) -> Self {
        Self { acquire, release }
    }
}

impl Default for HookLock {
    fn default() -> Self {
        Self::new(noop, noop)
    }
}

impl CriticalSection for HookLock {
    fn acquire(&self) {
        (self.acquire)()
    }

    fn release(&self) {
        (self.release)()
    }
}
