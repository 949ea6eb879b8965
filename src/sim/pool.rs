//! Fixed-factory object pool
//!
//! Entities are created once and recycled: `acquire` pops a slot from the
//! free list (or builds a new one with the factory) and `release` pushes it
//! back. Slots are never dropped, so the pool only grows.

/// Pool membership flag carried by every pooled entity
pub trait Poolable {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

/// Stable reference to a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolHandle(usize);

/// Recycler over entities of one variant
pub struct ObjectPool<T> {
    factory: fn() -> T,
    slots: Vec<T>,
    /// Indices of inactive slots (stack, O(1) reuse)
    free: Vec<usize>,
    /// Indices of active slots in acquisition order
    active: Vec<usize>,
}

impl<T: Poolable> ObjectPool<T> {
    /// Create a pool pre-populated with `initial_size` inactive entities
    pub fn new(factory: fn() -> T, initial_size: usize) -> Self {
        let mut slots = Vec::with_capacity(initial_size);
        for _ in 0..initial_size {
            let mut entity = factory();
            entity.set_active(false);
            slots.push(entity);
        }
        // Reverse so the first acquire reuses slot 0
        let free = (0..initial_size).rev().collect();
        Self {
            factory,
            slots,
            free,
            active: Vec::with_capacity(initial_size),
        }
    }

    /// Take an entity out of the pool, creating one if none are free
    pub fn acquire(&mut self) -> &mut T {
        let (_, entity) = self.acquire_with_handle();
        entity
    }

    /// Like [`acquire`](Self::acquire), also returning the slot handle
    pub fn acquire_with_handle(&mut self) -> (PoolHandle, &mut T) {
        let idx = match self.free.pop() {
            Some(idx) => idx,
            None => {
                self.slots.push((self.factory)());
                self.slots.len() - 1
            }
        };
        self.active.push(idx);
        let entity = &mut self.slots[idx];
        entity.set_active(true);
        (PoolHandle(idx), entity)
    }

    /// Return an entity to the pool. No-op (false) if it is not active.
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        let Some(pos) = self.active.iter().position(|&i| i == handle.0) else {
            return false;
        };
        self.active.remove(pos);
        self.slots[handle.0].set_active(false);
        self.free.push(handle.0);
        true
    }

    /// Return every active entity to the pool
    pub fn release_all(&mut self) {
        while let Some(idx) = self.active.pop() {
            self.slots[idx].set_active(false);
            self.free.push(idx);
        }
    }

    /// Release every active entity matching `pred`; returns how many
    pub fn release_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let slots = &mut self.slots;
        let free = &mut self.free;
        let before = self.active.len();
        self.active.retain(|&i| {
            if !pred(&slots[i]) {
                return true;
            }
            slots[i].set_active(false);
            free.push(i);
            false
        });
        before - self.active.len()
    }

    /// Active entities in acquisition order
    pub fn active(&self) -> impl Iterator<Item = &T> + '_ {
        self.active.iter().map(|&i| &self.slots[i])
    }

    /// Active entities with their handles, in acquisition order
    pub fn active_with_handles(&self) -> impl Iterator<Item = (PoolHandle, &T)> + '_ {
        self.active.iter().map(|&i| (PoolHandle(i), &self.slots[i]))
    }

    /// Visit every active entity mutably, in acquisition order
    pub fn for_each_active_mut(&mut self, mut f: impl FnMut(&mut T)) {
        for &i in &self.active {
            f(&mut self.slots[i]);
        }
    }

    /// Look up an active entity
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.slots.get(handle.0).filter(|e| e.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total entities ever created by this pool
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
