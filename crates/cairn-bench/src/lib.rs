//! Benchmark workloads for the Cairn bump allocator.
//!
//! Provides pre-built arena configurations and request mixes:
//!
//! - [`reference_config`]: 64 KiB region, 8-byte alignment
//! - [`stress_config`]: 4 MiB region, 16-byte alignment, odd start offset
//! - [`request_sizes`]: deterministic mix of small and medium requests

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cairn_arena::ArenaConfig;

/// Largest single request produced by [`request_sizes`].
pub const MAX_REQUEST: usize = 256;

/// A 64 KiB region with the default 8-byte alignment.
pub fn reference_config() -> ArenaConfig {
    ArenaConfig::new(64 * 1024)
}

/// A 4 MiB region, 16-byte aligned, starting 3 bytes into its buffer so
/// that start padding is exercised.
pub fn stress_config() -> ArenaConfig {
    ArenaConfig::new(4 * 1024 * 1024)
        .with_alignment(16)
        .with_start_offset(3)
}

/// Generate `n` deterministic request sizes in `1..=MAX_REQUEST`.
///
/// Roughly three quarters are small (at most 32 bytes), mimicking the
/// header-and-payload traffic a bump allocator typically serves.
pub fn request_sizes(n: usize, seed: u64) -> Vec<usize> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let r = (state >> 33) as usize;
            if r % 4 == 0 {
                1 + r % MAX_REQUEST
            } else {
                1 + r % 32
            }
        })
        .collect()
}
