//! Backend abstraction trait for the sprite renderer
//!
//! The trait mirrors an immediate-mode, fixed-function pipeline: a state
//! stack, matrix loads, capability toggles, material binding and single quad
//! submission. Implementations translate these onto their graphics API.

use bytemuck::{Pod, Zeroable};

use super::material::{MaterialFlags, MaterialObject};
use super::state::{BlendFunc, Capability, GraphicsState};
use super::texture::{TextureHandle, TextureUpload};
use super::RenderResult;
use crate::foundation::math::Mat4;

/// Vertex of an immediate-mode quad
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// Position in the current model-view space
    pub position: [f32; 3],
    /// Texture coordinates
    pub uv: [f32; 2],
}

impl QuadVertex {
    /// Vertex at `(x, y, z)` sampling `(u, v)`
    pub fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self { position: [x, y, z], uv: [u, v] }
    }
}

/// Main rendering backend trait
///
/// All calls happen on the thread owning the graphics context.
pub trait RenderBackend {
    /// Upload pixels into a new texture
    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> RenderResult<TextureHandle>;

    /// Destroy a texture created by [`create_texture`](Self::create_texture)
    fn destroy_texture(&mut self, handle: TextureHandle);

    /// Save the current graphics state
    fn push_state(&mut self);

    /// Restore the most recently saved graphics state
    fn pop_state(&mut self);

    /// Current graphics state
    fn state(&self) -> &GraphicsState;

    /// Replace the projection matrix
    fn load_projection(&mut self, projection: Mat4);

    /// Replace the model-view matrix
    fn load_model_view(&mut self, model_view: Mat4);

    /// Post-multiply the model-view matrix
    fn multiply_model_view(&mut self, transform: Mat4);

    /// Enable or disable a fixed-function capability
    fn set_capability(&mut self, capability: Capability, enabled: bool);

    /// Set the blend function
    fn set_blend_func(&mut self, func: BlendFunc);

    /// Make `material` current for the following draws
    ///
    /// `overrides` are OR-ed onto the material's own flags for this bind only.
    fn bind_material(&mut self, material: &MaterialObject, overrides: MaterialFlags);

    /// Draw one textured quad with the current state and material
    fn draw_quad(&mut self, vertices: &[QuadVertex; 4]);
}
