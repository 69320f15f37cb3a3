//! C-compatible arena statistics.

use cairn_arena::ArenaStats;

/// Snapshot of an arena's accounting, written by `cairn_arena_stats`.
///
/// All counters are widened to `u64` so the layout does not depend on the
/// host's pointer width.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CairnArenaStats {
    /// Usable bytes after start padding.
    pub capacity: u64,
    /// Bytes handed out so far, padding included.
    pub used: u64,
    /// Bytes still available.
    pub available: u64,
    /// Successful allocations.
    pub allocations: u64,
    /// Requests rejected for lack of space.
    pub failed: u64,
}

impl From<&ArenaStats> for CairnArenaStats {
    fn from(s: &ArenaStats) -> Self {
        Self {
            capacity: s.capacity as u64,
            used: s.used as u64,
            available: s.available as u64,
            allocations: s.allocations as u64,
            failed: s.failed as u64,
        }
    }
}

const _: () = assert!(std::mem::size_of::<CairnArenaStats>() == 40);
const _: () = assert!(std::mem::align_of::<CairnArenaStats>() == 8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widens_every_counter() {
        let stats = ArenaStats {
            capacity: 30,
            used: 12,
            available: 18,
            allocations: 3,
            failed: 1,
        };
        let c = CairnArenaStats::from(&stats);
        assert_eq!(
            c,
            CairnArenaStats {
                capacity: 30,
                used: 12,
                available: 18,
                allocations: 3,
                failed: 1,
            }
        );
    }
}
