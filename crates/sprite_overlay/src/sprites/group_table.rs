//! Fixed-capacity sprite group table

use super::types::SpriteRecord;

/// Table mapping a small group id to its loaded sprite frames
///
/// An empty slot holds `None`; a loaded slot holds at least one record, so
/// a slot's count is always its vector length.
#[derive(Debug)]
pub struct SpriteGroupTable {
    slots: Vec<Option<Vec<SpriteRecord>>>,
}

impl SpriteGroupTable {
    /// Create a table with `capacity` empty slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
        }
    }

    /// Number of group slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Reset every slot to empty
    pub fn init(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Drop every sprite of `group`; no-op when the slot is already empty
    pub fn dispose_group(&mut self, group: usize) {
        let slot = self.slot_mut(group);
        if let Some(records) = slot.take() {
            log::debug!("Disposing sprite group {} ({} sprites)", group, records.len());
        }
    }

    /// Dispose every loaded group
    pub fn dispose_all(&mut self) {
        for group in 0..self.slots.len() {
            if self.slots[group].is_some() {
                self.dispose_group(group);
            }
        }
    }

    /// Store `records` in `group`, returning what the slot held before
    ///
    /// An empty `records` leaves the slot empty.
    pub(crate) fn install(&mut self, group: usize, records: Vec<SpriteRecord>) -> Option<Vec<SpriteRecord>> {
        let slot = self.slot_mut(group);
        let previous = slot.take();
        if !records.is_empty() {
            *slot = Some(records);
        }
        previous
    }

    /// Number of sprites in `group`
    pub fn count(&self, group: usize) -> usize {
        self.slot(group).as_ref().map_or(0, Vec::len)
    }

    /// Whether `group` holds no sprites
    pub fn is_empty(&self, group: usize) -> bool {
        self.slot(group).is_none()
    }

    /// Sprites of `group`, if loaded
    pub fn group(&self, group: usize) -> Option<&[SpriteRecord]> {
        self.slot(group).as_deref()
    }

    /// Sprite `sprite_type` of `group`, if it exists
    pub fn get(&self, group: usize, sprite_type: usize) -> Option<&SpriteRecord> {
        self.group(group)?.get(sprite_type)
    }

    /// Sprite `sprite_type` of `group`
    ///
    /// # Panics
    /// If the group is empty or `sprite_type` is out of range.
    pub fn sprite(&self, group: usize, sprite_type: usize) -> &SpriteRecord {
        match self.get(group, sprite_type) {
            Some(record) => record,
            None => panic!(
                "illegal sprite type {} for group {} ({} sprites loaded)",
                sprite_type,
                group,
                self.count(group)
            ),
        }
    }

    /// Loaded groups with their sprites, in id order
    pub fn loaded_groups(&self) -> impl Iterator<Item = (usize, &[SpriteRecord])> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_deref().map(|records| (id, records)))
    }

    fn slot(&self, group: usize) -> &Option<Vec<SpriteRecord>> {
        let capacity = self.slots.len();
        self.slots
            .get(group)
            .unwrap_or_else(|| panic!("sprite group {} out of range (capacity {})", group, capacity))
    }

    fn slot_mut(&mut self, group: usize) -> &mut Option<Vec<SpriteRecord>> {
        let capacity = self.slots.len();
        self.slots
            .get_mut(group)
            .unwrap_or_else(|| panic!("sprite group {} out of range (capacity {})", group, capacity))
    }
}
