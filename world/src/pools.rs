//! Fixed-capacity slot pools for transient battlefield objects.
//!
//! Projectiles, visual effects and damage numbers churn every frame, so the
//! world recycles them through pools allocated once at construction. A full
//! pool reports exhaustion through `None` and the caller skips the object for
//! that frame; the simulation itself never stalls or reallocates.

/// Behaviour required of a type stored in a [`Pool`].
pub(crate) trait PoolSlot {
    /// Reports whether the slot currently holds a live object.
    fn is_active(&self) -> bool;

    /// Returns the slot to the free state.
    fn deactivate(&mut self);
}

/// Fixed-capacity pool that recycles slots in place.
#[derive(Clone, Debug)]
pub(crate) struct Pool<T> {
    slots: Vec<T>,
}

impl<T: PoolSlot + Default> Pool<T> {
    /// Allocates a pool with the given number of permanently-owned slots.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, T::default);
        Self { slots }
    }

    /// Hands out the first free slot, or `None` when the pool is exhausted.
    pub(crate) fn acquire(&mut self) -> Option<&mut T> {
        self.slots.iter_mut().find(|slot| !slot.is_active())
    }

    /// Iterator over every slot, active or not.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    /// Mutable iterator over every slot, active or not.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut()
    }

    /// Number of slots currently holding live objects.
    pub(crate) fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_active()).count()
    }

    /// Total slot capacity fixed at construction.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, Default)]
    struct Marker {
        active: bool,
        value: u32,
    }

    impl PoolSlot for Marker {
        fn is_active(&self) -> bool {
            self.active
        }

        fn deactivate(&mut self) {
            self.active = false;
        }
    }

    #[test]
    fn acquire_hands_out_each_slot_once() {
        let mut pool: Pool<Marker> = Pool::with_capacity(3);
        for value in 0..3 {
            let slot = pool.acquire().expect("free slot");
            slot.active = true;
            slot.value = value;
        }
        assert_eq!(pool.active_count(), 3);
        assert!(pool.acquire().is_none());
    }

    #[test]
    fn deactivated_slots_are_reissued() {
        let mut pool: Pool<Marker> = Pool::with_capacity(1);
        {
            let slot = pool.acquire().expect("first acquire");
            slot.active = true;
            slot.value = 7;
        }
        assert!(pool.acquire().is_none());

        for slot in pool.iter_mut() {
            slot.deactivate();
        }
        let slot = pool.acquire().expect("recycled slot");
        assert_eq!(slot.value, 7);
    }

    #[test]
    fn capacity_never_grows() {
        let mut pool: Pool<Marker> = Pool::with_capacity(4);
        for _ in 0..16 {
            if let Some(slot) = pool.acquire() {
                slot.active = true;
            }
        }
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.active_count(), 4);
    }

    #[test]
    fn empty_pool_rejects_immediately() {
        let mut pool: Pool<Marker> = Pool::with_capacity(0);
        assert!(pool.acquire().is_none());
        assert_eq!(pool.active_count(), 0);
    }
}
