//! Entity Registry - canonical physical state for every live entity
//!
//! Backed by a `DenseSlotMap`: values sit in one contiguous buffer (so the
//! batched collision kernels walk them without indirection) while handles
//! stay valid across removals thanks to generational keys + a free list.
//! Removal swaps the last value into the hole; iteration order is dense
//! order, not join order.

use slotmap::DenseSlotMap;

use crate::core::error::{Result, SimError};
use crate::domain::entity::{Attributes, EntityHandle};

pub struct Registry {
    entities: DenseSlotMap<EntityHandle, Attributes>,
    capacity: Option<usize>,
}

impl Registry {
    pub fn new(capacity: Option<usize>) -> Self {
        let entities = match capacity {
            Some(cap) => DenseSlotMap::with_capacity_and_key(cap),
            None => DenseSlotMap::with_key(),
        };
        Self { entities, capacity }
    }

    /// Register an entity. Fails fast once the configured capacity is reached.
    pub fn insert(&mut self, mut attrs: Attributes) -> Result<EntityHandle> {
        if let Some(capacity) = self.capacity {
            if self.entities.len() >= capacity {
                return Err(SimError::CapacityExceeded { capacity });
            }
        }
        if attrs.sanitize() {
            log::warn!("entity '{}' joined with malformed state; normalized", attrs.name);
        }
        Ok(self.entities.insert(attrs))
    }

    pub fn remove(&mut self, handle: EntityHandle) -> Option<Attributes> {
        self.entities.remove(handle)
    }

    #[inline]
    pub fn get(&self, handle: EntityHandle) -> Option<&Attributes> {
        self.entities.get(handle)
    }

    #[inline]
    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Attributes> {
        self.entities.get_mut(handle)
    }

    #[inline]
    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.entities.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &Attributes)> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityHandle, &mut Attributes)> {
        self.entities.iter_mut()
    }

    /// Handles in dense order (matches `values` / `values_mut`)
    pub fn handles(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        self.entities.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Attributes> {
        self.entities.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Attributes> {
        self.entities.values_mut()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
