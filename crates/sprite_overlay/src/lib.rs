//! # Sprite Overlay
//!
//! Indexed sprite groups for a 3D engine: 2D images loaded as textured
//! materials, attached to scene objects, or drawn immediately as flat
//! screen-space overlays.
//!
//! ## Features
//!
//! - **Sprite Groups**: Named frame sets loaded from `<root>/<group>/<group>NNN.tga`
//! - **Shared Materials**: Reference-counted materials shared between groups and objects
//! - **Sprite Objects**: Scene objects displaying one frame, with frame switching
//! - **Overlay Drawing**: Immediate screen-space quads with glow and rotation
//! - **Backend Agnostic**: Everything goes through the [`render::RenderBackend`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprite_overlay::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     sprite_overlay::foundation::logging::init();
//!
//!     let config = SpriteConfig::load_from_file("sprites.toml")?;
//!     let mut sprites = SpriteRenderer::new(config, HeadlessBackend::new())?;
//!     sprites.load_group(0, 4, "Ship")?;
//!
//!     let mut pool = sprites.create_object_pool();
//!     let ship = sprites
//!         .make_sprite_object(&mut pool, NewObjectDefinition::sprite(0, 0).with_scale(2.0))
//!         .ok_or("object pool full")?;
//!
//!     sprites.begin_frame();
//!     sprites.modify_sprite_frame(&mut pool, ship, 1);
//!     sprites.draw_sprite_objects(&pool);
//!     sprites.draw_sprite(0, 3, 16.0, 16.0, 48.0, 0.0, SpriteFlags::empty());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod scene;
pub mod sprites;

/// Common imports for sprite users
pub mod prelude {
    pub use crate::{
        foundation::math::{Vec2, Vec3, Mat4},
        config::{Config, ConfigError, SpriteConfig},
        assets::{ImageData, ImageDecoder, FileImageDecoder, AssetError},
        render::{RenderBackend, HeadlessBackend, MaterialFlags, MaterialHandle, RenderError},
        scene::{NewObjectDefinition, ObjectPool, ObjectKey, SceneObject, StatusFlags},
        sprites::{
            SpriteRenderer, SpriteGroupTable, SpriteRecord, SpriteFlags, SpriteMaterialRef,
            SpriteError, SpriteResult,
        },
    };
}
