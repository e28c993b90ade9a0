use std::fmt;

/// Default ceiling on scratch memory used while decoding a single command.
pub const DEFAULT_TEMP_ARENA_CAPACITY: usize = 64 * 1024 * 1024;

/// Round `value` up to the nearest multiple of `alignment`.
///
/// `alignment` must be > 0. Returns `None` on overflow.
pub(crate) fn align_up(value: usize, alignment: usize) -> Option<usize> {
    debug_assert!(alignment > 0);

    let add = alignment - 1;
    Some(value.checked_add(add)? / alignment * alignment)
}

/// Linear budget for scratch storage owned by one command scope.
///
/// Every array or record the decoder materializes is first charged against the arena. The arena
/// only tracks offsets; the actual storage is a `Vec` reserved fallibly once the charge succeeds,
/// so a hostile element count can never trigger an allocation beyond the budget. [`reset`]
/// releases the whole budget at once and is called when the command scope ends.
///
/// [`reset`]: TempArena::reset
#[derive(Clone)]
pub struct TempArena {
    capacity: usize,
    cursor: usize,
    high_water: usize,
    allocations: usize,
}

impl TempArena {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            cursor: 0,
            high_water: 0,
            allocations: 0,
        }
    }

    /// Release every allocation made since the last reset.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.allocations = 0;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.cursor)
    }

    /// Bytes charged since the last reset, including alignment padding.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Largest value [`used`](Self::used) has reached over the arena's lifetime.
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Allocations made since the last reset.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Charge `size` bytes with `alignment`.
    ///
    /// Returns the offset of the allocation within the arena.
    pub fn alloc(&mut self, size: usize, alignment: usize) -> Option<usize> {
        let alignment = alignment.max(1);

        let aligned = align_up(self.cursor, alignment)?;
        debug_assert_eq!(aligned % alignment, 0);

        let end = aligned.checked_add(size)?;
        if end > self.capacity {
            return None;
        }

        self.cursor = end;
        self.high_water = self.high_water.max(end);
        self.allocations += 1;
        Some(aligned)
    }

    /// Charge storage for `count` values of `T` and return an empty vector able to hold them.
    pub fn alloc_array<T>(&mut self, count: usize) -> Option<Vec<T>> {
        let size = core::mem::size_of::<T>().checked_mul(count)?;
        self.alloc(size, core::mem::align_of::<T>())?;

        let mut items = Vec::new();
        items.try_reserve_exact(count).ok()?;
        Some(items)
    }

    /// Charge storage for a single `T`.
    pub fn alloc_record<T>(&mut self) -> bool {
        self.alloc(core::mem::size_of::<T>(), core::mem::align_of::<T>())
            .is_some()
    }
}

impl Default for TempArena {
    fn default() -> Self {
        Self::new(DEFAULT_TEMP_ARENA_CAPACITY)
    }
}

impl fmt::Debug for TempArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TempArena")
            .field("capacity", &self.capacity)
            .field("cursor", &self.cursor)
            .field("high_water", &self.high_water)
            .field("allocations", &self.allocations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_multiple() {
        assert_eq!(align_up(0, 4), Some(0));
        assert_eq!(align_up(1, 4), Some(4));
        assert_eq!(align_up(4, 4), Some(4));
        assert_eq!(align_up(5, 4), Some(8));
        assert_eq!(align_up(255, 256), Some(256));
        assert_eq!(align_up(usize::MAX, 8), None);
    }

    #[test]
    fn arena_alloc_respects_alignment_and_capacity() {
        let mut arena = TempArena::new(64);

        assert_eq!(arena.alloc(1, 1), Some(0));
        assert_eq!(arena.alloc(1, 16), Some(16));

        // 47 bytes remaining (17..64), next 32-byte aligned allocation is 32.
        assert_eq!(arena.alloc(16, 32), Some(32));

        assert!(arena.alloc(33, 1).is_none());
        assert_eq!(arena.remaining(), 16);
        assert_eq!(arena.allocations(), 3);
    }

    #[test]
    fn arena_reset_reuses_space_and_keeps_high_water() {
        let mut arena = TempArena::new(64);
        assert_eq!(arena.alloc(8, 4), Some(0));
        assert_eq!(arena.alloc(8, 4), Some(8));

        arena.reset();
        assert_eq!(arena.used(), 0);
        assert_eq!(arena.high_water(), 16);
        assert_eq!(arena.alloc(8, 4), Some(0));
    }

    #[test]
    fn alloc_array_charges_element_storage() {
        let mut arena = TempArena::new(64);
        let items = arena.alloc_array::<u64>(4).unwrap();
        assert!(items.capacity() >= 4);
        assert_eq!(arena.used(), 32);

        assert!(arena.alloc_array::<u64>(5).is_none());
        assert!(arena.alloc_array::<u64>(usize::MAX).is_none());
        assert!(arena.alloc_record::<u32>());
    }
}
