//! Asset loading for sprite images

pub mod image_loader;

pub use image_loader::{ImageData, ImageDecoder, FileImageDecoder};

use thiserror::Error;

/// Result type for asset operations
pub type AssetResult<T> = Result<T, AssetError>;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),
    
    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),
    
    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
