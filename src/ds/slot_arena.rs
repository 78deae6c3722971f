#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Bounded slot arena: hands out indices in `[0, capacity)` and recycles
/// vacated ones through a free list. Never-used indices come from the
/// high-water mark (`slots.len()`), so no scanning is ever needed.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    capacity: usize,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            capacity,
            len: 0,
        }
    }

    /// Allocates a slot for `value`, preferring a recycled index over the
    /// high-water mark. Returns `None` when every slot is live; the caller
    /// must free a slot first.
    pub fn try_insert(&mut self, value: T) -> Option<SlotId> {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(value);
            idx
        } else if self.slots.len() < self.capacity {
            self.slots.push(Some(value));
            self.slots.len() - 1
        } else {
            return None;
        };
        self.len += 1;
        Some(SlotId(idx))
    }

    /// Vacates `id` and pushes it onto the free list for reuse.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        let value = slot.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.slots
            .get(id.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raises the slot bound. Shrinking is done by rebuilding a fresh arena,
    /// so `capacity` below the current bound is a caller bug.
    pub fn grow_to(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.capacity);
        self.slots
            .reserve(capacity.saturating_sub(self.slots.len()));
        self.capacity = capacity;
    }

    /// Vacates every slot and resets the free list and high-water mark.
    /// The capacity bound is unchanged.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }
}
