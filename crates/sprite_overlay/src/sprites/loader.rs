//! Sprite group loading
//!
//! Frames of a group live in `<data_root>/<sprite_dir>/<name>/` and are named
//! `<name>000.tga`, `<name>001.tga`, ... Every frame must decode to 32-bit
//! RGBA. Loading is all-or-nothing: the first bad frame aborts the group and
//! every texture created so far is released.

use std::path::Path;

use super::error::{SpriteError, SpriteResult};
use super::types::SpriteRecord;
use crate::assets::{AssetError, ImageData, ImageDecoder};
use crate::config::SpriteConfig;
use crate::render::{
    MaterialData, MaterialObject, PixelFormat, RenderBackend, TextureReleaseQueue, TextureUpload,
};

/// Decode and upload `count` frames of `group_name`
///
/// Requires a live backend, since every frame becomes a texture.
pub fn load_sprite_records<B, D>(
    backend: &mut B,
    decoder: &mut D,
    release: &TextureReleaseQueue,
    config: &SpriteConfig,
    count: usize,
    group_name: &str,
) -> SpriteResult<Vec<SpriteRecord>>
where
    B: RenderBackend + ?Sized,
    D: ImageDecoder + ?Sized,
{
    let mut records = Vec::with_capacity(count);

    for index in 0..count {
        let path = config.frame_path(group_name, index);

        let image = decoder
            .decode(&path)
            .map_err(|source| SpriteError::Asset { path: path.clone(), source })?;

        if !image.is_rgba32() {
            return Err(SpriteError::UnsupportedPixelFormat {
                found: format!("{:?} ({} bpp)", image.color_type, image.bits_per_pixel),
                path,
            });
        }

        records.push(upload_sprite(backend, release, &path, image)?);
    }

    Ok(records)
}

/// Upload one decoded RGBA frame and wrap it in a material
///
/// The pixel buffer is consumed and dropped once the texture exists.
fn upload_sprite<B: RenderBackend + ?Sized>(
    backend: &mut B,
    release: &TextureReleaseQueue,
    path: &Path,
    image: ImageData,
) -> SpriteResult<SpriteRecord> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(SpriteError::Asset {
            path: path.to_path_buf(),
            source: AssetError::InvalidData(format!("image is {}x{}", width, height)),
        });
    }

    let texture = backend
        .create_texture(&TextureUpload {
            pixels: &image.data,
            width,
            height,
            src_format: PixelFormat::Rgba,
            dest_format: PixelFormat::Rgba,
            mip_levels: 1,
        })
        .map_err(|source| SpriteError::Texture { path: path.to_path_buf(), source })?;
    drop(image);

    let material = MaterialObject::create(
        MaterialData::textured(texture, width, height, PixelFormat::Rgba),
        release.clone(),
    );

    Ok(SpriteRecord {
        width,
        height,
        // height over width, not the usual width over height
        aspect_ratio: height as f32 / width as f32,
        src_format: PixelFormat::Rgba,
        dest_format: PixelFormat::Rgba,
        material,
    })
}
