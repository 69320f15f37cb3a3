//! Host-supplied critical-section hooks.

use cairn_arena::CriticalSection;

/// Nullable C function pointer used for the acquire and release hooks.
///
/// A null hook does nothing, matching a target where the allocator is
/// only ever used from one context.
pub type CairnLockFn = Option<extern "C" fn()>;

/// Critical section that calls back into the host.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct HostLock {
    acquire: CairnLockFn,
    release: CairnLockFn,
}

impl HostLock {
    pub(crate) fn new(acquire: CairnLockFn, release: CairnLockFn) -> Self {
        Self { acquire, release }
    }
}

impl CriticalSection for HostLock {
    fn acquire(&self) {
        if let Some(hook) = self.acquire {
            hook();
        }
    }

    fn release(&self) {
        if let Some(hook) = self.release {
            hook();
        }
    }
}
