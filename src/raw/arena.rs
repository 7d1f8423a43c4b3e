use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes.
///
/// Removed slots go on a free list and are handed out again by the next
/// [`alloc`](Arena::alloc), so a map that churns at a steady size does not grow.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            // Strict less-than keeps the live node count within `Size::MAX`.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Moves the element out of its slot and recycles the handle.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reserved_capacity_is_reported() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn freed_slot_is_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        assert_eq!(arena.take(a), 'a');
        let c = arena.alloc('c');
        assert_eq!(c, a);
        assert_eq!(*arena.get(b), 'b');
        assert_eq!(*arena.get(c), 'c');
        assert_eq!(arena.len(), 2);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn taken_handle_is_invalid() {
        let mut arena = Arena::new();
        let h = arena.alloc(7u8);
        arena.take(h);
        let _ = arena.get(h);
    }

    #[derive(Clone, Debug)]
    enum Step {
        Alloc(u32),
        Overwrite(usize, u32),
        Take(usize),
        Clear,
    }

    fn step_strategy() -> impl Strategy<Value = Step> {
        prop_oneof![
            8 => any::<u32>().prop_map(Step::Alloc),
            3 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Step::Overwrite(which, value)),
            4 => any::<usize>().prop_map(Step::Take),
            1 => Just(Step::Clear),
        ]
    }

    proptest! {
        #[test]
        fn live_slots_track_model(steps in prop::collection::vec(step_strategy(), 0..256)) {
            let mut live: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for step in steps {
                match step {
                    Step::Alloc(value) => live.push((arena.alloc(value), value)),
                    Step::Overwrite(which, value) if !live.is_empty() => {
                        let slot = which % live.len();
                        *arena.get_mut(live[slot].0) = value;
                        live[slot].1 = value;
                    }
                    Step::Take(which) if !live.is_empty() => {
                        let (handle, expected) = live.swap_remove(which % live.len());
                        prop_assert_eq!(arena.take(handle), expected);
                    }
                    Step::Clear => {
                        arena.clear();
                        live.clear();
                    }
                    Step::Overwrite(..) | Step::Take(_) => {}
                }

                prop_assert_eq!(arena.len(), live.len());
                for &(handle, value) in &live {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }
}
