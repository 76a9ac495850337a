//! Scenario tests for the sprite subsystem
//!
//! Exercise [`SpriteRenderer`] end to end over the headless backend, with
//! frames coming from a scripted decoder or from TGA files on disk.

mod group_lifecycle;

use std::path::{Path, PathBuf};

use image::ColorType;

use crate::assets::{AssetError, AssetResult, ImageData, ImageDecoder};
use crate::config::SpriteConfig;
use crate::foundation::logging;
use crate::render::{HeadlessBackend, PixelFormat};
use crate::sprites::SpriteRenderer;

/// Decoder handing out generated frames and recording every request
///
/// Frame numbers count requests, so script one group load per decoder.
pub struct ScriptedDecoder {
    /// Paths requested so far, in order
    pub requested: Vec<PathBuf>,
    width: u32,
    height: u32,
    rgb_frames: Vec<usize>,
    missing_frames: Vec<usize>,
}

impl ScriptedDecoder {
    /// Every frame is an opaque white RGBA image of `width x height`
    pub fn uniform(width: u32, height: u32) -> Self {
        Self {
            requested: Vec::new(),
            width,
            height,
            rgb_frames: Vec::new(),
            missing_frames: Vec::new(),
        }
    }

    /// Frame `index` decodes as 24-bit RGB
    pub fn with_rgb_frame(mut self, index: usize) -> Self {
        self.rgb_frames.push(index);
        self
    }

    /// Frame `index` does not exist
    pub fn with_missing_frame(mut self, index: usize) -> Self {
        self.missing_frames.push(index);
        self
    }
}

impl ImageDecoder for ScriptedDecoder {
    fn decode(&mut self, path: &Path) -> AssetResult<ImageData> {
        let index = self.requested.len();
        self.requested.push(path.to_path_buf());

        if self.missing_frames.contains(&index) {
            return Err(AssetError::NotFound(path.display().to_string()));
        }

        if self.rgb_frames.contains(&index) {
            return Ok(ImageData {
                data: vec![0; (self.width * self.height * 3) as usize],
                width: self.width,
                height: self.height,
                bits_per_pixel: 24,
                format: Some(PixelFormat::Rgb),
                color_type: ColorType::Rgb8,
            });
        }

        Ok(ImageData::solid_color(self.width, self.height, [255, 255, 255, 255]))
    }
}

/// Renderer over a fresh headless backend
pub fn renderer() -> SpriteRenderer<HeadlessBackend> {
    renderer_with_config(SpriteConfig::new("Data").with_max_groups(8))
}

/// Renderer over a fresh headless backend with `config`
pub fn renderer_with_config(config: SpriteConfig) -> SpriteRenderer<HeadlessBackend> {
    logging::try_init_for_tests();
    SpriteRenderer::new(config, HeadlessBackend::new()).unwrap()
}

/// Renderer with `count` frames of `width x height` loaded into `group`
pub fn renderer_with_group(group: usize, count: usize, width: u32, height: u32) -> SpriteRenderer<HeadlessBackend> {
    let mut sprites = renderer();
    let mut decoder = ScriptedDecoder::uniform(width, height);
    sprites.load_group_with(&mut decoder, group, count, "Test").unwrap();
    sprites
}
