//! Bounded scene object pool

use slotmap::{new_key_type, SlotMap};

use super::object::{NewObjectDefinition, SceneObject};

new_key_type! {
    /// Stable key of a scene object; stale after deletion
    pub struct ObjectKey;
}

/// Pool of live scene objects with a fixed capacity
pub struct ObjectPool {
    objects: SlotMap<ObjectKey, SceneObject>,
    capacity: usize,
    next_seq: u64,
}

impl ObjectPool {
    /// Create an empty pool holding at most `capacity` objects
    pub fn new(capacity: usize) -> Self {
        Self {
            objects: SlotMap::with_capacity_and_key(capacity),
            capacity,
            next_seq: 0,
        }
    }

    /// Allocate an object from `def`
    ///
    /// Returns `None` when the pool is full.
    pub fn make_new_object(&mut self, def: &NewObjectDefinition) -> Option<ObjectKey> {
        if self.objects.len() >= self.capacity {
            log::warn!("Object pool full ({} objects)", self.capacity);
            return None;
        }
        let mut object = SceneObject::from_definition(def);
        object.creation_seq = self.next_seq;
        self.next_seq += 1;

        let key = self.objects.insert(object);
        log::trace!("Created {:?} object {:?}", def.genre, key);
        Some(key)
    }

    /// Remove an object, dropping whatever it holds
    pub fn delete_object(&mut self, key: ObjectKey) -> Option<SceneObject> {
        self.objects.remove(key)
    }

    /// Get an object
    pub fn get(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    /// Get an object mutably
    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        self.objects.get_mut(key)
    }

    /// Keys ordered by draw slot; equal slots keep creation order
    ///
    /// Slot map indices are reused after deletion, so order comes from the
    /// creation sequence rather than from iteration order.
    pub fn keys_in_draw_order(&self) -> Vec<ObjectKey> {
        let mut keys: Vec<_> = self
            .objects
            .iter()
            .map(|(key, obj)| ((obj.slot, obj.creation_seq), key))
            .collect();
        keys.sort_unstable_by_key(|(order, _)| *order);
        keys.into_iter().map(|(_, key)| key).collect()
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the pool holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Maximum number of live objects
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
