//! Concurrent allocation through a shared arena.
//!
//! Several threads hammer one `Arena<SpinLock>` and the issued blocks are
//! checked for overlap and byte conservation afterwards.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use cairn_arena::{Arena, ArenaError, Block, CriticalSection, SpinLock};

const THREADS: usize = 8;
const REGION: usize = 64 * 1024;
const BASE: usize = 0x10_0000;

/// Spin lock that also records how many sections were entered and the
/// maximum number of contexts observed inside at once.
#[derive(Default)]
struct AuditedLock {
    inner: SpinLock,
    inside: AtomicUsize,
    max_inside: AtomicUsize,
    entries: AtomicUsize,
}

impl CriticalSection for AuditedLock {
    fn acquire(&self) {
        self.inner.acquire();
        let now = self.inside.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_inside.fetch_max(now, Ordering::SeqCst);
        self.entries.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&self) {
        self.inside.fetch_sub(1, Ordering::SeqCst);
        self.inner.release();
    }
}

fn shared_arena(alignment: usize) -> Arc<Arena<AuditedLock>> {
    let mut arena = Arena::with_region(BASE, REGION, alignment, AuditedLock::default()).unwrap();
    arena.enable(true).unwrap();
    Arc::new(arena)
}

fn run_workers(arena: &Arc<Arena<AuditedLock>>, sizes: &'static [usize]) -> Vec<Block> {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let arena = Arc::clone(arena);
            thread::spawn(move || {
                let mut mine = Vec::new();
                let mut i = t;
                loop {
                    let size = sizes[i % sizes.len()];
                    match arena.allocate(size) {
                        Ok(block) => mine.push(block),
                        Err(ArenaError::OutOfMemory { .. }) => break,
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                    i += 1;
                }
                mine
            })
        })
        .collect();
    handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect()
}

#[test]
fn concurrent_blocks_are_disjoint_and_aligned() {
    let arena = shared_arena(8);
    let mut blocks = run_workers(&arena, &[1, 7, 8, 13, 64]);

    blocks.sort_by_key(|b| b.addr());
    for pair in blocks.windows(2) {
        assert!(
            pair[0].addr_range().end <= pair[1].addr(),
            "{} overlaps {}",
            pair[0],
            pair[1]
        );
    }
    assert!(blocks.iter().all(|b| b.addr() % 8 == 0));

    let total: usize = blocks.iter().map(|b| b.len()).sum();
    assert_eq!(total + arena.available(), REGION);
}

#[test]
fn critical_section_is_never_shared() {
    let arena = shared_arena(4);
    let blocks = run_workers(&arena, &[4, 12, 20]);

    let lock = arena.lock();
    assert_eq!(lock.max_inside.load(Ordering::SeqCst), 1);
    assert_eq!(lock.inside.load(Ordering::SeqCst), 0);
    assert!(!lock.inner.is_locked());

    // Every attempt, successful or not, entered the section exactly once.
    let stats = arena.stats();
    assert_eq!(stats.allocations, blocks.len());
    assert_eq!(
        lock.entries.load(Ordering::SeqCst),
        stats.allocations + stats.failed
    );
}

#[test]
fn smaller_requests_still_fit_after_large_ones_fail() {
    let arena = shared_arena(16);
    let _ = run_workers(&arena, &[4096]);
    let left = arena.available();
    assert!(left < 4096);
    if left >= 16 {
        assert!(arena.allocate(16).is_ok());
    }
}
