//! Headless rendering backend
//!
//! Keeps a real state stack and texture table but never touches a GPU.
//! Every call is recorded as a [`BackendCommand`], and quad vertices are
//! appended to a byte stream in the layout a GPU upload would use. Used by
//! tools running without a graphics context and by the test suite.

use std::collections::HashMap;

use crate::foundation::math::Mat4;
use crate::render::backend::{QuadVertex, RenderBackend};
use crate::render::material::{MaterialFlags, MaterialObject};
use crate::render::state::{BlendFunc, Capability, GraphicsState};
use crate::render::texture::{PixelFormat, TextureHandle, TextureUpload};
use crate::render::{RenderError, RenderResult};

/// Metadata of a live texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Stored pixel format
    pub format: PixelFormat,
    /// Mip levels
    pub mip_levels: u32,
}

/// Material state captured at bind time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundMaterial {
    /// Bound texture
    pub texture: TextureHandle,
    /// Material flags combined with the bind overrides
    pub flags: MaterialFlags,
}

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    /// Texture created
    CreateTexture {
        /// New handle
        handle: TextureHandle,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// Texture destroyed
    DestroyTexture(TextureHandle),
    /// State saved
    PushState,
    /// State restored
    PopState,
    /// Projection replaced
    LoadProjection(Mat4),
    /// Model-view replaced
    LoadModelView(Mat4),
    /// Model-view post-multiplied
    MultiplyModelView(Mat4),
    /// Capability toggled
    SetCapability(Capability, bool),
    /// Blend function changed
    SetBlendFunc(BlendFunc),
    /// Material bound
    BindMaterial(BoundMaterial),
    /// Quad drawn
    DrawQuad {
        /// Quad corners
        vertices: [QuadVertex; 4],
        /// State at draw time
        state: GraphicsState,
        /// Material at draw time
        material: Option<BoundMaterial>,
    },
}

/// Backend that records calls instead of drawing
#[derive(Debug)]
pub struct HeadlessBackend {
    state: GraphicsState,
    stack: Vec<GraphicsState>,
    textures: HashMap<TextureHandle, TextureInfo>,
    next_texture: u32,
    texture_limit: Option<usize>,
    bound: Option<BoundMaterial>,
    commands: Vec<BackendCommand>,
    vertex_stream: Vec<u8>,
}

impl HeadlessBackend {
    /// Create a backend with default state and no textures
    pub fn new() -> Self {
        Self {
            state: GraphicsState::default(),
            stack: Vec::new(),
            textures: HashMap::new(),
            next_texture: 1, // Start from 1, reserve 0 for "no texture"
            texture_limit: None,
            bound: None,
            commands: Vec::new(),
            vertex_stream: Vec::new(),
        }
    }

    /// Refuse texture creation once `limit` textures are alive
    pub fn with_texture_limit(mut self, limit: usize) -> Self {
        self.texture_limit = Some(limit);
        self
    }

    /// Number of live textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Info for a live texture
    pub fn texture_info(&self, handle: TextureHandle) -> Option<&TextureInfo> {
        self.textures.get(&handle)
    }

    /// Depth of the saved-state stack
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Every call recorded so far
    pub fn commands(&self) -> &[BackendCommand] {
        &self.commands
    }

    /// Recorded quad draws
    pub fn draws(&self) -> impl Iterator<Item = &BackendCommand> {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, BackendCommand::DrawQuad { .. }))
    }

    /// Raw vertex bytes submitted so far
    pub fn vertex_stream(&self) -> &[u8] {
        &self.vertex_stream
    }

    /// Forget recorded commands and vertices, keeping textures and state
    pub fn clear_commands(&mut self) {
        self.commands.clear();
        self.vertex_stream.clear();
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> RenderResult<TextureHandle> {
        if upload.width == 0 || upload.height == 0 {
            return Err(RenderError::ResourceCreationFailed(format!(
                "texture size {}x{} is empty",
                upload.width, upload.height
            )));
        }
        if upload.pixels.len() != upload.expected_len() {
            return Err(RenderError::ResourceCreationFailed(format!(
                "expected {} bytes of {:?} pixels, got {}",
                upload.expected_len(),
                upload.src_format,
                upload.pixels.len()
            )));
        }
        if let Some(limit) = self.texture_limit {
            if self.textures.len() >= limit {
                return Err(RenderError::ResourceCreationFailed(format!(
                    "texture limit of {} reached",
                    limit
                )));
            }
        }

        let handle = TextureHandle(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(handle, TextureInfo {
            width: upload.width,
            height: upload.height,
            format: upload.dest_format,
            mip_levels: upload.mip_levels,
        });
        self.commands.push(BackendCommand::CreateTexture {
            handle,
            width: upload.width,
            height: upload.height,
        });

        log::debug!("Created texture {:?} ({}x{})", handle, upload.width, upload.height);
        Ok(handle)
    }

    fn destroy_texture(&mut self, handle: TextureHandle) {
        if self.textures.remove(&handle).is_none() {
            log::warn!("Destroying unknown texture {:?}", handle);
        }
        self.commands.push(BackendCommand::DestroyTexture(handle));
    }

    fn push_state(&mut self) {
        self.stack.push(self.state.clone());
        self.commands.push(BackendCommand::PushState);
    }

    fn pop_state(&mut self) {
        match self.stack.pop() {
            Some(saved) => self.state = saved,
            None => log::error!("Graphics state stack underflow"),
        }
        self.commands.push(BackendCommand::PopState);
    }

    fn state(&self) -> &GraphicsState {
        &self.state
    }

    fn load_projection(&mut self, projection: Mat4) {
        self.state.projection = projection;
        self.commands.push(BackendCommand::LoadProjection(projection));
    }

    fn load_model_view(&mut self, model_view: Mat4) {
        self.state.model_view = model_view;
        self.commands.push(BackendCommand::LoadModelView(model_view));
    }

    fn multiply_model_view(&mut self, transform: Mat4) {
        self.state.model_view *= transform;
        self.commands.push(BackendCommand::MultiplyModelView(transform));
    }

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        self.state.set_enabled(capability, enabled);
        self.commands.push(BackendCommand::SetCapability(capability, enabled));
    }

    fn set_blend_func(&mut self, func: BlendFunc) {
        self.state.blend = func;
        self.commands.push(BackendCommand::SetBlendFunc(func));
    }

    fn bind_material(&mut self, material: &MaterialObject, overrides: MaterialFlags) {
        let texture = material.texture();
        if !self.textures.contains_key(&texture) {
            log::warn!("Binding material over destroyed texture {:?}", texture);
        }
        let bound = BoundMaterial {
            texture,
            flags: material.flags() | overrides,
        };
        self.bound = Some(bound);
        self.commands.push(BackendCommand::BindMaterial(bound));
    }

    fn draw_quad(&mut self, vertices: &[QuadVertex; 4]) {
        self.vertex_stream.extend_from_slice(bytemuck::cast_slice(vertices));
        self.commands.push(BackendCommand::DrawQuad {
            vertices: *vertices,
            state: self.state.clone(),
            material: self.bound,
        });
    }
}
