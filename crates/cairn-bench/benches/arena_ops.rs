//! Criterion micro-benchmarks for arena allocation.

use std::hint::black_box;

use cairn_arena::{Arena, BufferArena, CriticalSection, NoLock, SpinLock};
use cairn_bench::{reference_config, request_sizes, stress_config};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

/// Fake region base; the arena never dereferences it.
const BASE: usize = 0x10_0000;

fn enabled_arena<L: CriticalSection>(lock: L) -> Arena<L> {
    let config = reference_config();
    let mut arena = Arena::with_region(BASE, config.size, config.alignment, lock).unwrap();
    arena.enable(true).unwrap();
    arena
}

/// Benchmark: Fill a 64 KiB region from the reference request mix, no lock.
fn bench_alloc_nolock(c: &mut Criterion) {
    let sizes = request_sizes(4096, 42);
    c.bench_function("arena_alloc_nolock", |b| {
        b.iter_batched(
            || enabled_arena(NoLock),
            |arena| {
                for &n in &sizes {
                    let _ = black_box(arena.allocate(n));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: Same fill under an uncontended spin lock.
fn bench_alloc_spinlock(c: &mut Criterion) {
    let sizes = request_sizes(4096, 42);
    c.bench_function("arena_alloc_spinlock", |b| {
        b.iter_batched(
            || enabled_arena(SpinLock::new()),
            |arena| {
                for &n in &sizes {
                    let _ = black_box(arena.allocate(n));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: Rejection path on an exhausted arena.
fn bench_alloc_exhausted(c: &mut Criterion) {
    let arena = enabled_arena(NoLock);
    while arena.allocate(4096).is_ok() {}
    c.bench_function("arena_alloc_exhausted", |b| {
        b.iter(|| black_box(arena.allocate(black_box(8192))));
    });
}

/// Benchmark: Copy payloads into an owned 4 MiB buffer.
fn bench_buffer_copy(c: &mut Criterion) {
    let payload = [0x5Au8; 200];
    c.bench_function("buffer_arena_allocate_copy", |b| {
        b.iter_batched(
            || {
                let mut arena = BufferArena::new(stress_config(), NoLock).unwrap();
                arena.enable(true).unwrap();
                arena
            },
            |mut arena| {
                while let Ok(block) = arena.allocate_copy(&payload) {
                    black_box(block);
                }
                arena
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_alloc_nolock,
    bench_alloc_spinlock,
    bench_alloc_exhausted,
    bench_buffer_copy
);
criterion_main!(benches);
