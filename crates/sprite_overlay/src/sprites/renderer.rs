//! Sprite renderer
//!
//! Owns the sprite group table and the rendering backend, and exposes the
//! whole sprite surface: group loading and disposal, sprite render objects,
//! blend flags and drawing.
//!
//! # Usage
//!
//! ```rust,no_run
//! use sprite_overlay::prelude::*;
//!
//! # fn main() -> Result<(), SpriteError> {
//! let mut sprites = SpriteRenderer::new(SpriteConfig::new("Data"), HeadlessBackend::new())?;
//! sprites.load_group(0, 3, "Explosion")?;
//! sprites.blend_all_sprites_in_group(0);
//!
//! sprites.begin_frame();
//! sprites.draw_sprite(0, 1, 320.0, 240.0, 64.0, 0.0, SpriteFlags::GLOW);
//! assert_eq!(sprites.polys_this_frame(), 2);
//! # Ok(())
//! # }
//! ```

use std::rc::Rc;

use super::error::SpriteResult;
use super::group_table::SpriteGroupTable;
use super::loader::load_sprite_records;
use super::objects::SpriteMaterialRef;
use super::types::SpriteFlags;
use crate::assets::{FileImageDecoder, ImageDecoder};
use crate::config::SpriteConfig;
use crate::foundation::math::{orthographic, radians_to_degrees, rotation_z, translation, Mat4};
use crate::render::{
    BlendFunc, Capability, MaterialFlags, QuadVertex, RenderBackend, StateScope, TextureReleaseQueue,
};
use crate::scene::{NewObjectDefinition, ObjectGenre, ObjectKey, ObjectPool, StatusFlags};

/// Triangles emitted per sprite quad
const TRIANGLES_PER_QUAD: u32 = 2;

/// Sprite subsystem context
///
/// Textures are destroyed through the owned backend, so object pools holding
/// sprite objects must be dropped (or emptied) before the renderer. Materials
/// still alive when the renderer drops keep their textures forever; the drop
/// logs how many.
pub struct SpriteRenderer<B: RenderBackend> {
    config: SpriteConfig,
    backend: B,
    groups: SpriteGroupTable,
    release_queue: TextureReleaseQueue,
    polys_this_frame: u32,
}

impl<B: RenderBackend> SpriteRenderer<B> {
    /// Create the sprite subsystem over an initialized backend
    pub fn new(config: SpriteConfig, backend: B) -> SpriteResult<Self> {
        config.validate()?;
        if !config.data_root_exists() {
            log::warn!("Sprite data root {:?} does not exist", config.data_root);
        }

        log::info!(
            "Sprite renderer ready: {} group slots, {}x{} overlay",
            config.max_groups,
            config.logical_width,
            config.logical_height
        );

        Ok(Self {
            groups: SpriteGroupTable::new(config.max_groups),
            config,
            backend,
            release_queue: TextureReleaseQueue::new(),
            polys_this_frame: 0,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &SpriteConfig {
        &self.config
    }

    /// Rendering backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable rendering backend, for the host's own drawing
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Loaded sprite groups
    pub fn groups(&self) -> &SpriteGroupTable {
        &self.groups
    }

    /// Object pool sized from the configuration
    pub fn create_object_pool(&self) -> ObjectPool {
        ObjectPool::new(self.config.max_scene_objects)
    }

    /// Reset every group slot to empty
    pub fn init(&mut self) {
        self.groups.init();
        self.flush_released_textures();
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// Load `count` frames of `group_name` from disk into slot `group`
    ///
    /// See [`load_group_with`](Self::load_group_with).
    pub fn load_group(&mut self, group: usize, count: usize, group_name: &str) -> SpriteResult<()> {
        self.load_group_with(&mut FileImageDecoder, group, count, group_name)
    }

    /// Load `count` frames of `group_name` through `decoder` into slot `group`
    ///
    /// Frames are requested in index order. An occupied slot is disposed
    /// first. On error the slot is left empty and every texture created for
    /// the group is released.
    ///
    /// # Panics
    /// If `group` is not below the table capacity.
    pub fn load_group_with<D: ImageDecoder + ?Sized>(
        &mut self,
        decoder: &mut D,
        group: usize,
        count: usize,
        group_name: &str,
    ) -> SpriteResult<()> {
        if !self.groups.is_empty(group) {
            log::warn!(
                "Loading \"{}\" over sprite group {} which still holds {} sprites",
                group_name,
                group,
                self.groups.count(group)
            );
            self.dispose_group(group);
        }

        let result = load_sprite_records(
            &mut self.backend,
            decoder,
            &self.release_queue,
            &self.config,
            count,
            group_name,
        );

        match result {
            Ok(records) => {
                log::info!("Loaded sprite group {} \"{}\" ({} sprites)", group, group_name, records.len());
                self.groups.install(group, records);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load sprite group {} \"{}\": {}", group, group_name, e);
                self.flush_released_textures();
                Err(e)
            }
        }
    }

    /// Release every sprite of `group`; no-op when empty
    pub fn dispose_group(&mut self, group: usize) {
        self.groups.dispose_group(group);
        self.flush_released_textures();
    }

    /// Release every loaded group
    pub fn dispose_all(&mut self) {
        self.groups.dispose_all();
        self.flush_released_textures();
    }

    /// Materials created by this renderer that are still alive
    ///
    /// Counts records in the group table and references held by sprite
    /// objects alike.
    pub fn live_materials(&self) -> usize {
        self.release_queue.sharers() - 1
    }

    /// Destroy the textures of materials nobody references any more
    ///
    /// Called by every operation that drops materials; hosts call it after
    /// deleting sprite objects. Returns the number of textures destroyed.
    pub fn flush_released_textures(&mut self) -> usize {
        let released = self.release_queue.drain();
        for &handle in &released {
            self.backend.destroy_texture(handle);
        }
        if !released.is_empty() {
            log::debug!("Destroyed {} released sprite textures", released.len());
        }
        released.len()
    }

    // ------------------------------------------------------------------
    // Sprite objects
    // ------------------------------------------------------------------

    /// Create a scene object displaying frame `def.sprite_type` of `def.group`
    ///
    /// The object is forced to the sprite genre and is never lit, culled or
    /// depth tested. Returns `None` if the pool refuses the object.
    ///
    /// # Panics
    /// If the frame is not loaded.
    pub fn make_sprite_object(&self, pool: &mut ObjectPool, mut def: NewObjectDefinition) -> Option<ObjectKey> {
        let count = self.groups.count(def.group);
        if def.sprite_type >= count {
            panic!(
                "make_sprite_object: illegal type {} for group {} ({} sprites)",
                def.sprite_type, def.group, count
            );
        }

        def.genre = ObjectGenre::Sprite;
        def.flags |= StatusFlags::KEEP_BACKFACES | StatusFlags::NO_ZBUFFER | StatusFlags::NO_LIGHTING;

        let Some(key) = pool.make_new_object(&def) else {
            log::warn!("make_sprite_object: no object for group {} type {}", def.group, def.sprite_type);
            return None;
        };

        let object = pool.get_mut(key)?;
        let sprite = SpriteMaterialRef::create(&self.groups, def.group, def.sprite_type, object.scale.x, object.coord)
            .unwrap_or_else(|| panic!("make_sprite_object: cannot reference group {} type {}", def.group, def.sprite_type));
        object.sprite = Some(sprite);

        Some(key)
    }

    /// Switch the frame a sprite object displays
    ///
    /// No-op when `sprite_type` is already displayed. Otherwise the old
    /// material reference is dropped and a new one is built from the
    /// object's current scale and position.
    ///
    /// # Panics
    /// If `key` is stale or the new frame is not loaded.
    pub fn modify_sprite_frame(&self, pool: &mut ObjectPool, key: ObjectKey, sprite_type: usize) {
        let object = pool
            .get_mut(key)
            .unwrap_or_else(|| panic!("modify_sprite_frame: stale object key {:?}", key));

        if sprite_type == object.sprite_type {
            return;
        }

        object.sprite = None;

        let sprite = SpriteMaterialRef::create(&self.groups, object.group, sprite_type, object.scale.x, object.coord)
            .unwrap_or_else(|| {
                panic!(
                    "modify_sprite_frame: illegal type {} for group {} ({} sprites)",
                    sprite_type,
                    object.group,
                    self.groups.count(object.group)
                )
            });

        object.sprite = Some(sprite);
        object.sprite_type = sprite_type;
    }

    // ------------------------------------------------------------------
    // Blending
    // ------------------------------------------------------------------

    /// Mark every sprite of `group` as always blended
    ///
    /// # Panics
    /// If the group is empty.
    pub fn blend_all_sprites_in_group(&self, group: usize) {
        let Some(records) = self.groups.group(group) else {
            panic!("blend_all_sprites_in_group: group {} is empty", group);
        };

        for record in records {
            record.material.insert_flags(MaterialFlags::ALWAYS_BLEND);
        }
    }

    /// Mark one sprite as always blended
    ///
    /// # Panics
    /// If the frame is not loaded.
    pub fn blend_sprite(&self, group: usize, sprite_type: usize) {
        let Some(record) = self.groups.get(group, sprite_type) else {
            panic!(
                "blend_sprite: illegal type {} for group {} ({} sprites)",
                sprite_type,
                group,
                self.groups.count(group)
            );
        };

        record.material.insert_flags(MaterialFlags::ALWAYS_BLEND);
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Reset per-frame statistics
    pub fn begin_frame(&mut self) {
        self.polys_this_frame = 0;
        self.flush_released_textures();
    }

    /// Triangles drawn since [`begin_frame`](Self::begin_frame)
    pub fn polys_this_frame(&self) -> u32 {
        self.polys_this_frame
    }

    /// Draw a sprite as a flat overlay quad in logical screen space
    ///
    /// The quad spans `(x, y)` to `(x + scale, y + scale)` in a Y-down
    /// space of `logical_width x logical_height`, always square whatever the
    /// image's aspect ratio. `rot` (radians) rotates about the screen origin.
    /// Lighting, culling and depth testing are off and texture coordinates
    /// are clamped; [`SpriteFlags::GLOW`] blends additively. The backend
    /// state is restored afterwards.
    ///
    /// # Panics
    /// If the frame is not loaded.
    pub fn draw_sprite(
        &mut self,
        group: usize,
        sprite_type: usize,
        x: f32,
        y: f32,
        scale: f32,
        rot: f32,
        flags: SpriteFlags,
    ) {
        let material = &self.groups.sprite(group, sprite_type).material;
        let projection = orthographic(0.0, self.config.logical_width, self.config.logical_height, 0.0, 0.0, 1.0);

        {
            let mut gl = StateScope::new(&mut self.backend);

            gl.load_projection(projection);
            gl.load_model_view(Mat4::identity());

            gl.set_capability(Capability::Lighting, false);
            gl.set_capability(Capability::CullFace, false);
            gl.set_capability(Capability::DepthTest, false);

            if flags.contains(SpriteFlags::GLOW) {
                gl.set_blend_func(BlendFunc::ADDITIVE);
            }

            if rot != 0.0 {
                log::trace!("draw_sprite: rotating {:.1} degrees", radians_to_degrees(rot));
                gl.multiply_model_view(rotation_z(rot));
            }

            gl.bind_material(material, MaterialFlags::CLAMP_U | MaterialFlags::CLAMP_V);
            gl.draw_quad(&screen_quad(x, y, scale));
        }

        self.polys_this_frame += TRIANGLES_PER_QUAD;
    }

    /// Draw a sprite object at its world position
    ///
    /// Uses the current projection and model-view (the host's camera). The
    /// quad is centred on the object, `scale.x` wide and
    /// `scale.y * aspect_ratio` tall. The object's status flags switch off
    /// lighting, culling and depth testing for this draw. Returns `false`
    /// for objects without a sprite attached.
    ///
    /// # Panics
    /// If `key` is stale.
    pub fn draw_sprite_object(&mut self, pool: &ObjectPool, key: ObjectKey) -> bool {
        let object = pool
            .get(key)
            .unwrap_or_else(|| panic!("draw_sprite_object: stale object key {:?}", key));

        let Some(sprite) = &object.sprite else {
            log::debug!("draw_sprite_object: object {:?} has no sprite attached", key);
            return false;
        };

        let aspect_ratio = self
            .groups
            .get(sprite.group, sprite.sprite_type)
            .filter(|record| Rc::ptr_eq(&record.material, &sprite.material))
            .map_or_else(
                || {
                    // group was reloaded or disposed; the material still knows its size
                    let (width, height) = sprite.material.size();
                    height as f32 / width as f32
                },
                |record| record.aspect_ratio,
            );

        {
            let mut gl = StateScope::new(&mut self.backend);

            if object.status.contains(StatusFlags::NO_LIGHTING) {
                gl.set_capability(Capability::Lighting, false);
            }
            if object.status.contains(StatusFlags::KEEP_BACKFACES) {
                gl.set_capability(Capability::CullFace, false);
            }
            if object.status.contains(StatusFlags::NO_ZBUFFER) {
                gl.set_capability(Capability::DepthTest, false);
            }

            gl.multiply_model_view(translation(sprite.coord));
            gl.bind_material(&sprite.material, MaterialFlags::empty());
            gl.draw_quad(&centered_quad(sprite.scale.x, sprite.scale.y * aspect_ratio));
        }

        self.polys_this_frame += TRIANGLES_PER_QUAD;
        true
    }

    /// Draw every visible sprite object of `pool` in slot order
    ///
    /// Returns the number of objects drawn.
    pub fn draw_sprite_objects(&mut self, pool: &ObjectPool) -> usize {
        let mut drawn = 0;
        for key in pool.keys_in_draw_order() {
            let is_sprite = pool
                .get(key)
                .is_some_and(|obj| obj.genre == ObjectGenre::Sprite && obj.is_visible());
            if is_sprite && self.draw_sprite_object(pool, key) {
                drawn += 1;
            }
        }
        drawn
    }
}

impl<B: RenderBackend> Drop for SpriteRenderer<B> {
    fn drop(&mut self) {
        self.dispose_all();

        let outliving = self.live_materials();
        if outliving > 0 {
            log::warn!(
                "{} sprite materials outlive the renderer; their textures will not be destroyed",
                outliving
            );
        }
    }
}

/// Screen-space quad from `(x, y)` to `(x + size, y + size)`
fn screen_quad(x: f32, y: f32, size: f32) -> [QuadVertex; 4] {
    [
        QuadVertex::new(x, y, 0.0, 0.0, 0.0),
        QuadVertex::new(x + size, y, 0.0, 1.0, 0.0),
        QuadVertex::new(x + size, y + size, 0.0, 1.0, 1.0),
        QuadVertex::new(x, y + size, 0.0, 0.0, 1.0),
    ]
}

/// Y-up quad of `width x height` centred on the origin, image top at +Y
fn centered_quad(width: f32, height: f32) -> [QuadVertex; 4] {
    let (hw, hh) = (width * 0.5, height * 0.5);
    [
        QuadVertex::new(-hw, hh, 0.0, 0.0, 0.0),
        QuadVertex::new(hw, hh, 0.0, 1.0, 0.0),
        QuadVertex::new(hw, -hh, 0.0, 1.0, 1.0),
        QuadVertex::new(-hw, -hh, 0.0, 0.0, 1.0),
    ]
}
