//! Fixed-capacity slot arena with tombstones.
//!
//! Slots are allocated once up front. A slot dropped by `retain_mut` is
//! flagged dead and pushed onto a free list; the next spawn reuses it with a bumped generation,
//! so stale handles never resolve to the new occupant.

/// Generational handle into a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub index: u32,
    pub generation: u32,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    alive: bool,
    value: Option<T>,
}

#[derive(Debug, Clone)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    live: usize,
}

impl<T> SlotArena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            slots.push(Slot { generation: 0, alive: false, value: None });
        }
        // Reverse so that slot 0 is handed out first.
        let free_list = (0..capacity as u32).rev().collect();
        Self { slots, free_list, live: 0 }
    }

    /// Insert a value. Returns `None` when every slot is occupied.
    pub fn spawn(&mut self, value: T) -> Option<Handle> {
        let index = self.free_list.pop()?;
        let slot = &mut self.slots[index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        slot.alive = true;
        slot.value = Some(value);
        self.live += 1;
        Some(Handle { index, generation: slot.generation })
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.alive && slot.generation == handle.generation {
            slot.value.as_ref()
        } else {
            None
        }
    }

    /// Keep only the values for which `keep` returns true; the rest are
    /// tombstoned in place.
    pub fn retain_mut(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if !slot.alive {
                continue;
            }
            let still_alive = match slot.value.as_mut() {
                Some(value) => keep(value),
                None => false,
            };
            if !still_alive {
                slot.alive = false;
                slot.value = None;
                self.free_list.push(index as u32);
                self.live -= 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.retain_mut(|_| false);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots
            .iter()
            .filter(|s| s.alive)
            .filter_map(|s| s.value.as_ref())
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
