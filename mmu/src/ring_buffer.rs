/// Fixed-capacity buffer that overwrites its slots in insertion order.
///
/// The cursor always names the next slot to overwrite. Slots are never
/// compacted: clearing one leaves a hole and does not move the cursor.
#[derive(Debug, Clone)]
pub struct RingBuffer<T, const N: usize> {
    slots: [Option<T>; N],
    cursor: usize,
}

impl<T: Copy, const N: usize> RingBuffer<T, N> {
    pub fn new() -> Self {
        Self {
            slots: [None; N],
            cursor: 0,
        }
    }

    /// Writes `value` at the cursor and advances it, returning what was there.
    pub fn push(&mut self, value: T) -> Option<T> {
        let replaced = self.slots[self.cursor].replace(value);
        self.cursor = (self.cursor + 1) % N;
        replaced
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot)?.as_ref()
    }

    /// Occupied slots in slot order, not insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }

    /// Empties every slot whose value matches; returns how many were cleared.
    pub fn clear_where(&mut self, mut matches: impl FnMut(&T) -> bool) -> usize {
        let mut cleared = 0;
        for slot in self.slots.iter_mut() {
            if slot.as_ref().is_some_and(&mut matches) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }
}

impl<T: Copy, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
