//! Rendering layer
//!
//! The sprite subsystem talks to the GPU only through the [`RenderBackend`]
//! trait: texture creation and release, a fixed-function style state stack,
//! material binding and single-quad submission.
//!
//! - [`texture`]: texture handles, pixel formats and deferred release
//! - [`material`]: shared, reference-counted material objects
//! - [`state`]: graphics state snapshot and the scoped push/pop guard
//! - [`backend`]: the backend trait and quad vertex layout
//! - [`backends`]: concrete backends

pub mod texture;
pub mod material;
pub mod state;
pub mod backend;
pub mod backends;

pub use texture::{TextureHandle, PixelFormat, TextureUpload, TextureReleaseQueue};
pub use material::{MaterialObject, MaterialHandle, MaterialData, MaterialFlags};
pub use state::{GraphicsState, Capability, BlendFactor, BlendFunc, StateScope};
pub use backend::{RenderBackend, QuadVertex};
pub use backends::headless::{HeadlessBackend, BackendCommand, BoundMaterial};

use thiserror::Error;

/// Errors reported by rendering backends
#[derive(Error, Debug)]
pub enum RenderError {
    /// Resource creation or management failed
    ///
    /// Occurs when GPU resources (textures, buffers) cannot be created,
    /// typically due to memory constraints or invalid data.
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
