//! Scene object data

use bitflags::bitflags;

use crate::foundation::math::Vec3;
use crate::sprites::SpriteMaterialRef;

bitflags! {
    /// Per-object render status
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u32 {
        /// Object is not drawn
        const HIDDEN         = 1 << 0;
        /// Draw back faces (no culling)
        const KEEP_BACKFACES = 1 << 1;
        /// Do not test against the z-buffer
        const NO_ZBUFFER     = 1 << 2;
        /// Do not light
        const NO_LIGHTING    = 1 << 3;
    }
}

/// Kind of scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectGenre {
    /// Object drawn by game code
    #[default]
    Custom,
    /// Object displaying one sprite frame
    Sprite,
}

/// Parameters for creating a scene object
#[derive(Debug, Clone, PartialEq)]
pub struct NewObjectDefinition {
    /// Object kind
    pub genre: ObjectGenre,
    /// Sprite group the object displays
    pub group: usize,
    /// Frame index within `group`
    pub sprite_type: usize,
    /// World position
    pub coord: Vec3,
    /// Uniform scale
    pub scale: f32,
    /// Euler rotation in radians
    pub rotation: Vec3,
    /// Draw order, lower first
    pub slot: i32,
    /// Status flags
    pub flags: StatusFlags,
}

impl Default for NewObjectDefinition {
    fn default() -> Self {
        Self {
            genre: ObjectGenre::Custom,
            group: 0,
            sprite_type: 0,
            coord: Vec3::zeros(),
            scale: 1.0,
            rotation: Vec3::zeros(),
            slot: 0,
            flags: StatusFlags::empty(),
        }
    }
}

impl NewObjectDefinition {
    /// Definition displaying frame `sprite_type` of `group`
    pub fn sprite(group: usize, sprite_type: usize) -> Self {
        Self {
            group,
            sprite_type,
            ..Default::default()
        }
    }

    /// Set the world position
    pub fn with_coord(mut self, coord: Vec3) -> Self {
        self.coord = coord;
        self
    }

    /// Set the uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the draw order
    pub fn with_slot(mut self, slot: i32) -> Self {
        self.slot = slot;
        self
    }

    /// Add status flags
    pub fn with_flags(mut self, flags: StatusFlags) -> Self {
        self.flags |= flags;
        self
    }
}

/// Live scene object
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Object kind
    pub genre: ObjectGenre,
    /// Sprite group
    pub group: usize,
    /// Frame index within `group`
    pub sprite_type: usize,
    /// World position
    pub coord: Vec3,
    /// Euler rotation in radians
    pub rotation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Draw order, lower first
    pub slot: i32,
    /// Status flags
    pub status: StatusFlags,
    /// Attached sprite material, if the object displays a sprite
    pub sprite: Option<SpriteMaterialRef>,
    /// Creation order within the owning pool
    pub creation_seq: u64,
}

impl SceneObject {
    /// Build an object from its definition, with no sprite attached
    pub fn from_definition(def: &NewObjectDefinition) -> Self {
        Self {
            genre: def.genre,
            group: def.group,
            sprite_type: def.sprite_type,
            coord: def.coord,
            rotation: def.rotation,
            scale: Vec3::repeat(def.scale),
            slot: def.slot,
            status: def.flags,
            sprite: None,
            creation_seq: 0,
        }
    }

    /// Whether the object should be drawn
    pub fn is_visible(&self) -> bool {
        !self.status.contains(StatusFlags::HIDDEN)
    }
}
