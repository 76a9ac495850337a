//! Sprite material references held by scene objects

use std::rc::Rc;

use super::group_table::SpriteGroupTable;
use crate::foundation::math::{Vec2, Vec3};
use crate::render::MaterialHandle;

/// A render object's reference to one sprite frame
///
/// Holds its own strong reference to the frame's material, so the texture
/// stays alive while the object displays it even if the group is disposed.
#[derive(Debug, Clone)]
pub struct SpriteMaterialRef {
    /// Sprite group
    pub group: usize,
    /// Frame index within the group
    pub sprite_type: usize,
    /// Shared material of the frame
    pub material: MaterialHandle,
    /// Quad scale in world units
    pub scale: Vec2,
    /// World position
    pub coord: Vec3,
}

impl SpriteMaterialRef {
    /// Reference frame `sprite_type` of `group` with a uniform `scale`
    ///
    /// Returns `None` when the frame is not loaded.
    pub fn create(
        table: &SpriteGroupTable,
        group: usize,
        sprite_type: usize,
        scale: f32,
        coord: Vec3,
    ) -> Option<Self> {
        let record = table.get(group, sprite_type)?;
        Some(Self {
            group,
            sprite_type,
            material: Rc::clone(&record.material),
            scale: Vec2::new(scale, scale),
            coord,
        })
    }

    /// Whether both references share one material
    pub fn same_material(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.material, &other.material)
    }
}
