//! Texture handles, pixel formats and deferred texture release

use std::cell::RefCell;
use std::rc::Rc;

use image::ColorType;

/// Handle for a GPU texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Pixel layouts understood by the texture path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit red, green, blue, alpha
    Rgba,
    /// 8-bit red, green, blue
    Rgb,
    /// 8-bit luminance and alpha
    LuminanceAlpha,
    /// 8-bit luminance
    Luminance,
}

impl PixelFormat {
    /// Map a decoder colour type onto a texture pixel format
    ///
    /// Only 8-bit-per-channel layouts have an equivalent.
    pub fn from_color_type(color_type: ColorType) -> Option<Self> {
        match color_type {
            ColorType::Rgba8 => Some(Self::Rgba),
            ColorType::Rgb8 => Some(Self::Rgb),
            ColorType::La8 => Some(Self::LuminanceAlpha),
            ColorType::L8 => Some(Self::Luminance),
            _ => None,
        }
    }

    /// Bytes per pixel
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba => 4,
            Self::Rgb => 3,
            Self::LuminanceAlpha => 2,
            Self::Luminance => 1,
        }
    }
}

/// Pixel upload request for [`RenderBackend::create_texture`]
///
/// [`RenderBackend::create_texture`]: super::RenderBackend::create_texture
#[derive(Debug, Clone, Copy)]
pub struct TextureUpload<'a> {
    /// Pixel data laid out as `src_format`
    pub pixels: &'a [u8],
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Layout of `pixels`
    pub src_format: PixelFormat,
    /// Layout the GPU should store
    pub dest_format: PixelFormat,
    /// Mip levels to allocate
    pub mip_levels: u32,
}

impl TextureUpload<'_> {
    /// Number of bytes `pixels` must contain
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.src_format.bytes_per_pixel()
    }
}

/// Textures whose last material reference has been dropped
///
/// Materials push their texture here when they drop; the owner of the
/// backend drains the queue and destroys the GPU resources. Cloning shares
/// the same queue.
#[derive(Debug, Clone, Default)]
pub struct TextureReleaseQueue {
    pending: Rc<RefCell<Vec<TextureHandle>>>,
}

impl TextureReleaseQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a texture for destruction
    pub fn push(&self, handle: TextureHandle) {
        self.pending.borrow_mut().push(handle);
    }

    /// Take every queued texture, oldest first
    pub fn drain(&self) -> Vec<TextureHandle> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    /// Number of textures waiting for destruction
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Check if nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Number of handles sharing this queue, `self` included
    ///
    /// Every live material holds one, so this is the owner plus the
    /// materials that may still push a texture.
    pub fn sharers(&self) -> usize {
        Rc::strong_count(&self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_queue_is_shared_between_clones() {
        let queue = TextureReleaseQueue::new();
        let other = queue.clone();

        other.push(TextureHandle(3));
        other.push(TextureHandle(7));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.drain(), vec![TextureHandle(3), TextureHandle(7)]);
        assert!(other.is_empty());

        assert_eq!(queue.sharers(), 2);
        drop(other);
        assert_eq!(queue.sharers(), 1);
    }

    #[test]
    fn test_pixel_format_mapping() {
        assert_eq!(PixelFormat::from_color_type(ColorType::Rgba8), Some(PixelFormat::Rgba));
        assert_eq!(PixelFormat::from_color_type(ColorType::Rgba16), None);

        let pixels = [0u8; 24];
        let upload = TextureUpload {
            pixels: &pixels,
            width: 3,
            height: 2,
            src_format: PixelFormat::Rgba,
            dest_format: PixelFormat::Rgba,
            mip_levels: 1,
        };
        assert_eq!(upload.expected_len(), 24);
    }
}
