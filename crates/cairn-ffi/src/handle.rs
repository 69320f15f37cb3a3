//! Generational handle table backing the `u64` handles given to C.
//!
//! A handle packs a slot index (upper 32 bits) and a generation (lower 32
//! bits). Generations start at 1, so the all-zero handle a C caller gets
//! from zero-initialised memory never resolves. Destroying a value bumps
//! its slot's generation; stale copies of the old handle then miss.

const GENERATION_BITS: u32 = 32;

fn pack(slot: u32, generation: u32) -> u64 {
    (u64::from(slot) << GENERATION_BITS) | u64::from(generation)
}

fn unpack(handle: u64) -> (usize, u32) {
    ((handle >> GENERATION_BITS) as usize, handle as u32)
}

enum Entry<T> {
    Live { generation: u32, value: T },
    /// Reusable. `next` threads the free list through vacant entries.
    Vacant { generation: u32, next: Option<u32> },
    /// Generation space exhausted; never handed out again.
    Retired,
}

/// Owns values on behalf of C callers, addressed by [`u64`] handles.
pub(crate) struct HandleTable<T> {
    entries: Vec<Entry<T>>,
    free_head: Option<u32>,
    live: usize,
}

impl<T> HandleTable<T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_head: None,
            live: 0,
        }
    }

    /// Store `value` and return the handle that now owns it.
    pub(crate) fn insert(&mut self, value: T) -> u64 {
        self.live += 1;
        if let Some(slot) = self.free_head {
            let entry = &mut self.entries[slot as usize];
            let (generation, next) = match *entry {
                Entry::Vacant { generation, next } => (generation, next),
                _ => unreachable!("free list points at an occupied slot"),
            };
            self.free_head = next;
            *entry = Entry::Live { generation, value };
            return pack(slot, generation);
        }
        let slot = self.entries.len() as u32;
        self.entries.push(Entry::Live {
            generation: 1,
            value,
        });
        pack(slot, 1)
    }

    pub(crate) fn get(&self, handle: u64) -> Option<&T> {
        let (slot, wanted) = unpack(handle);
        match self.entries.get(slot)? {
            Entry::Live { generation, value } if *generation == wanted => Some(value),
            _ => None,
        }
    }

    /// Take the value out, invalidating `handle` and every copy of it.
    ///
    /// Removing through a stale or unknown handle returns `None` and leaves
    /// the table untouched, so a double destroy from C is harmless.
    pub(crate) fn remove(&mut self, handle: u64) -> Option<T> {
        let (slot, wanted) = unpack(handle);
        let entry = self.entries.get_mut(slot)?;
        let generation = match entry {
            Entry::Live { generation, .. } if *generation == wanted => *generation,
            _ => return None,
        };

        let replacement = match generation.checked_add(1) {
            Some(next_gen) => {
                let vacant = Entry::Vacant {
                    generation: next_gen,
                    next: self.free_head,
                };
                self.free_head = Some(slot as u32);
                vacant
            }
            None => Entry::Retired,
        };
        self.live -= 1;
        match core::mem::replace(entry, replacement) {
            Entry::Live { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Number of values currently owned by the table.
    pub(crate) fn len(&self) -> usize {
        self.live
    }
}
