//! Image loading utilities for sprite texture data
//!
//! Decodes images with the `image` crate while keeping the pixel layout the
//! file was stored in, so callers can reject anything that is not already
//! 32-bit RGBA instead of silently converting it.

use std::path::Path;
use image::{ColorType, DynamicImage};

use super::{AssetError, AssetResult};
use crate::render::PixelFormat;

/// Decoded image data ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw pixel data in `format` layout
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Bits per pixel as reported by the decoder
    pub bits_per_pixel: u16,
    /// Pixel layout, `None` when it has no texture format equivalent
    pub format: Option<PixelFormat>,
    /// Decoder colour type name, kept for diagnostics
    pub color_type: ColorType,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> AssetResult<Self> {
        let path_ref = path.as_ref();
        
        log::debug!("Loading image from: {:?}", path_ref);

        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }
        
        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path_ref.display(), e)))?;
        
        let image = Self::from_dynamic(img);
        log::trace!(
            "Decoded {}x{} {:?} from {:?}",
            image.width, image.height, image.color_type, path_ref
        );
        Ok(image)
    }
    
    fn from_dynamic(img: DynamicImage) -> Self {
        let color_type = img.color();
        let (width, height) = (img.width(), img.height());
        Self {
            bits_per_pixel: color_type.bits_per_pixel(),
            format: PixelFormat::from_color_type(color_type),
            color_type,
            width,
            height,
            data: img.into_bytes(),
        }
    }
    
    /// Create a solid color RGBA image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);
        
        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }
        
        Self {
            data,
            width,
            height,
            bits_per_pixel: 32,
            format: Some(PixelFormat::Rgba),
            color_type: ColorType::Rgba8,
        }
    }

    /// Whether the pixels are 32-bit RGBA, the only layout sprites accept
    pub fn is_rgba32(&self) -> bool {
        self.bits_per_pixel == 32 && self.format == Some(PixelFormat::Rgba)
    }
}

/// Source of decoded images, keyed by path
pub trait ImageDecoder {
    /// Decode the image stored at `path`
    fn decode(&mut self, path: &Path) -> AssetResult<ImageData>;
}

/// Decoder reading images from the filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageDecoder;

impl ImageDecoder for FileImageDecoder {
    fn decode(&mut self, path: &Path) -> AssetResult<ImageData> {
        ImageData::from_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert!(img.is_rgba32());
        assert_eq!(img.data.len(), 4 * 4 * 4); // 4x4 pixels, 4 bytes each
        
        // Check first pixel is red
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_load_rgba_tga_keeps_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.tga");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 40]))
            .save(&path)
            .unwrap();

        let img = ImageData::from_file(&path).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert!(img.is_rgba32());
        assert_eq!(&img.data[0..4], &[10, 20, 30, 40]);
    }

    #[test]
    fn test_load_rgb_tga_is_not_rgba32() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.tga");
        image::RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]))
            .save(&path)
            .unwrap();

        let img = ImageData::from_file(&path).unwrap();
        assert_eq!(img.bits_per_pixel, 24);
        assert_eq!(img.format, Some(PixelFormat::Rgb));
        assert!(!img.is_rgba32());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = ImageData::from_file("definitely/not/here000.tga");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_garbage_file_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tga");
        std::fs::write(&path, [0u8, 1, 2, 3]).unwrap();

        let result = ImageData::from_file(&path);
        assert!(matches!(result, Err(AssetError::LoadFailed(_))));
    }
}
