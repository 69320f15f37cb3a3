//! Fixed region layout and alignment arithmetic.
//!
//! A [`Region`] is the `[start, end)` address range an arena partitions,
//! plus the alignment every block must honour. It is computed once at
//! init and never changes afterwards.

use crate::error::ArenaError;

/// Round `value` up to the next multiple of `alignment`.
///
/// `alignment` must be a non-zero power of two. Returns `None` if the
/// rounded value does not fit in `usize`.
#[inline]
pub fn align_up(value: usize, alignment: usize) -> Option<usize> {
    debug_assert!(alignment.is_power_of_two());
    let mask = alignment - 1;
    Some(value.checked_add(mask)? & !mask)
}

/// The immutable layout of an initialized arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    start: usize,
    end: usize,
    aligned_start: usize,
    alignment: usize,
}

impl Region {
    /// Validate and record a region of `size` bytes at `start`.
    ///
    /// Checks run in a fixed order so the reported reason is stable:
    /// null start, zero size, zero alignment, non-power-of-two alignment,
    /// address-space overflow, and finally a region too short to hold the
    /// padding needed to align its first block.
    pub fn new(start: usize, size: usize, alignment: usize) -> Result<Self, ArenaError> {
        if start == 0 {
            return Err(ArenaError::InvalidArgument {
                reason: "region start is null",
            });
        }
        if size == 0 {
            return Err(ArenaError::InvalidArgument {
                reason: "region size is zero",
            });
        }
        if alignment == 0 {
            return Err(ArenaError::InvalidArgument {
                reason: "alignment is zero",
            });
        }
        if !alignment.is_power_of_two() {
            return Err(ArenaError::InvalidArgument {
                reason: "alignment is not a power of two",
            });
        }
        let end = start
            .checked_add(size)
            .ok_or(ArenaError::InvalidArgument {
                reason: "region wraps the address space",
            })?;
        let aligned_start = match align_up(start, alignment) {
            Some(a) if a <= end => a,
            _ => {
                return Err(ArenaError::InvalidArgument {
                    reason: "region is smaller than its alignment padding",
                })
            }
        };
        Ok(Self {
            start,
            end,
            aligned_start,
            alignment,
        })
    }

    /// First byte of the caller-supplied region.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last byte of the region.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Total region size in bytes, including any leading padding.
    pub fn size(&self) -> usize {
        self.end - self.start
    }

    /// Required block alignment.
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// `start` rounded up to `alignment`; the cursor's initial position.
    pub fn aligned_start(&self) -> usize {
        self.aligned_start
    }

    /// Bytes usable for allocation: `end - aligned_start`.
    pub fn capacity(&self) -> usize {
        self.end - self.aligned_start
    }

    /// Whether `addr` falls inside `[start, end)`.
    pub fn contains(&self, addr: usize) -> bool {
        addr >= self.start && addr < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_next_multiple() {
        assert_eq!(align_up(0, 4), Some(0));
        assert_eq!(align_up(1, 4), Some(4));
        assert_eq!(align_up(4, 4), Some(4));
        assert_eq!(align_up(5, 1), Some(5));
        assert_eq!(align_up(13, 8), Some(16));
    }

    #[test]
    fn align_up_overflow_is_none() {
        assert_eq!(align_up(usize::MAX, 2), None);
        assert_eq!(align_up(usize::MAX - 2, 4), None);
        assert_eq!(align_up(usize::MAX, 1), Some(usize::MAX));
    }

    #[test]
    fn aligned_start_is_unchanged() {
        let r = Region::new(0x1000, 32, 8).unwrap();
        assert_eq!(r.aligned_start(), 0x1000);
        assert_eq!(r.end(), 0x1020);
        assert_eq!(r.capacity(), 32);
    }

    #[test]
    fn unaligned_start_is_padded() {
        let r = Region::new(0x1002, 30, 4).unwrap();
        assert_eq!(r.start(), 0x1002);
        assert_eq!(r.aligned_start(), 0x1004);
        assert_eq!(r.size(), 30);
        assert_eq!(r.capacity(), 28);
    }

    #[test]
    fn padding_may_consume_whole_region() {
        let r = Region::new(0x1001, 7, 8).unwrap();
        assert_eq!(r.aligned_start(), r.end());
        assert_eq!(r.capacity(), 0);
    }

    #[test]
    fn region_shorter_than_padding_is_rejected() {
        assert!(matches!(
            Region::new(0x1001, 3, 8),
            Err(ArenaError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn guards_reject_bad_arguments() {
        assert!(Region::new(0, 32, 1).is_err());
        assert!(Region::new(0x1000, 0, 1).is_err());
        assert!(Region::new(0x1000, 32, 0).is_err());
        assert!(Region::new(0x1000, 32, 6).is_err());
        assert!(Region::new(usize::MAX - 4, 32, 1).is_err());
    }

    #[test]
    fn contains_is_half_open() {
        let r = Region::new(0x1000, 16, 1).unwrap();
        assert!(r.contains(0x1000));
        assert!(r.contains(0x100f));
        assert!(!r.contains(0x1010));
        assert!(!r.contains(0x0fff));
    }
}
