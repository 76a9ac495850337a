//! Shared material objects
//!
//! A material wraps one GPU texture plus the render flags used when it is
//! bound. Materials are handed out as [`MaterialHandle`]s (`Rc`), so a sprite
//! record and any number of render objects can hold the same material. The
//! texture is queued for destruction when the last handle drops.

use std::cell::Cell;
use std::rc::Rc;

use bitflags::bitflags;

use super::texture::{PixelFormat, TextureHandle, TextureReleaseQueue};
use crate::foundation::math::Vec4;

bitflags! {
    /// Render flags carried by a material
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MaterialFlags: u32 {
        /// Material samples its texture
        const TEXTURED     = 1 << 0;
        /// Always draw with alpha blending, even in opaque passes
        const ALWAYS_BLEND = 1 << 1;
        /// Clamp texture coordinates on U
        const CLAMP_U      = 1 << 2;
        /// Clamp texture coordinates on V
        const CLAMP_V      = 1 << 3;
    }
}

/// Shared handle to a material
pub type MaterialHandle = Rc<MaterialObject>;

/// Creation parameters for a material
#[derive(Debug, Clone)]
pub struct MaterialData {
    /// Initial render flags
    pub flags: MaterialFlags,
    /// Diffuse tint (RGBA)
    pub diffuse_color: Vec4,
    /// Mip levels present in the texture
    pub mip_levels: u32,
    /// Texture width in pixels
    pub width: u32,
    /// Texture height in pixels
    pub height: u32,
    /// Layout the pixels were uploaded from
    pub src_format: PixelFormat,
    /// Layout the GPU stores
    pub dest_format: PixelFormat,
    /// Texture the material samples
    pub texture: TextureHandle,
}

impl MaterialData {
    /// Untinted textured material over an already uploaded texture
    pub fn textured(texture: TextureHandle, width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            flags: MaterialFlags::TEXTURED,
            diffuse_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            mip_levels: 1,
            width,
            height,
            src_format: format,
            dest_format: format,
            texture,
        }
    }
}

/// Material resource owning a texture reference
#[derive(Debug)]
pub struct MaterialObject {
    flags: Cell<MaterialFlags>,
    diffuse_color: Vec4,
    mip_levels: u32,
    width: u32,
    height: u32,
    src_format: PixelFormat,
    dest_format: PixelFormat,
    texture: TextureHandle,
    release: TextureReleaseQueue,
}

impl MaterialObject {
    /// Wrap `data` in a new shared material
    ///
    /// `release` receives the texture once the last handle is dropped.
    pub fn create(data: MaterialData, release: TextureReleaseQueue) -> MaterialHandle {
        log::trace!("Creating material over texture {:?}", data.texture);
        Rc::new(Self {
            flags: Cell::new(data.flags),
            diffuse_color: data.diffuse_color,
            mip_levels: data.mip_levels,
            width: data.width,
            height: data.height,
            src_format: data.src_format,
            dest_format: data.dest_format,
            texture: data.texture,
            release,
        })
    }

    /// Current render flags
    pub fn flags(&self) -> MaterialFlags {
        self.flags.get()
    }

    /// Add render flags; flags are never removed
    pub fn insert_flags(&self, flags: MaterialFlags) {
        self.flags.set(self.flags.get() | flags);
    }

    /// Diffuse tint
    pub fn diffuse_color(&self) -> Vec4 {
        self.diffuse_color
    }

    /// Mip levels in the texture
    pub fn mip_levels(&self) -> u32 {
        self.mip_levels
    }

    /// Texture size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Source and destination pixel formats
    pub fn formats(&self) -> (PixelFormat, PixelFormat) {
        (self.src_format, self.dest_format)
    }

    /// Texture sampled by this material
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }
}

impl Drop for MaterialObject {
    fn drop(&mut self) {
        log::trace!("Material over texture {:?} released", self.texture);
        self.release.push(self.texture);
    }
}
