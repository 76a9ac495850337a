//! Sprite subsystem errors

use std::path::PathBuf;

use thiserror::Error;

use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::render::RenderError;

/// Result type for sprite operations
pub type SpriteResult<T> = Result<T, SpriteError>;

/// Data errors raised while loading sprites
#[derive(Error, Debug)]
pub enum SpriteError {
    /// Frame could not be read or decoded
    #[error("Failed to load sprite {}: {source}", path.display())]
    Asset {
        /// Frame file
        path: PathBuf,
        /// Underlying asset error
        #[source]
        source: AssetError,
    },

    /// Frame decoded to something other than 32-bit RGBA
    #[error("Sprite {} is {found}, expected 32-bit RGBA", path.display())]
    UnsupportedPixelFormat {
        /// Frame file
        path: PathBuf,
        /// Decoded layout
        found: String,
    },

    /// Backend refused the texture
    #[error("Failed to create texture for {}: {source}", path.display())]
    Texture {
        /// Frame file
        path: PathBuf,
        /// Underlying backend error
        #[source]
        source: RenderError,
    },

    /// Sprite configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SpriteError {
    /// File the error refers to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Asset { path, .. }
            | Self::UnsupportedPixelFormat { path, .. }
            | Self::Texture { path, .. } => Some(path),
            Self::Config(_) => None,
        }
    }
}
