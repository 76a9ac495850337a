//! Sprite data types

use bitflags::bitflags;

use crate::render::{MaterialHandle, PixelFormat};

bitflags! {
    /// Options for immediate sprite draws
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpriteFlags: u32 {
        /// Additive blending
        const GLOW = 1 << 0;
    }
}

/// One loaded sprite frame
#[derive(Debug, Clone)]
pub struct SpriteRecord {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// `height / width`
    pub aspect_ratio: f32,
    /// Pixel layout read from disk
    pub src_format: PixelFormat,
    /// Pixel layout stored on the GPU
    pub dest_format: PixelFormat,
    /// Material wrapping the frame's texture
    pub material: MaterialHandle,
}
