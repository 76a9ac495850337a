//! Graphics state snapshot and scoped state save/restore

use std::ops::{Deref, DerefMut};

use super::backend::RenderBackend;
use crate::foundation::math::Mat4;

/// Fixed-function capabilities the sprite paths toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Per-vertex lighting
    Lighting,
    /// Back-face culling
    CullFace,
    /// Depth testing against the z-buffer
    DepthTest,
}

/// Blend factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// 0
    Zero,
    /// 1
    One,
    /// Source alpha
    SrcAlpha,
    /// 1 - source alpha
    OneMinusSrcAlpha,
}

/// Source/destination blend factor pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendFunc {
    /// Factor applied to the incoming fragment
    pub src: BlendFactor,
    /// Factor applied to the framebuffer
    pub dst: BlendFactor,
}

impl BlendFunc {
    /// Standard alpha blending
    pub const ALPHA: Self = Self { src: BlendFactor::SrcAlpha, dst: BlendFactor::OneMinusSrcAlpha };
    /// Additive blending for glowing effects
    pub const ADDITIVE: Self = Self { src: BlendFactor::SrcAlpha, dst: BlendFactor::One };
}

impl Default for BlendFunc {
    fn default() -> Self {
        Self::ALPHA
    }
}

/// Everything a state push saves and a pop restores
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    /// Projection matrix
    pub projection: Mat4,
    /// Model-view matrix
    pub model_view: Mat4,
    /// Lighting enabled
    pub lighting: bool,
    /// Back-face culling enabled
    pub cull_face: bool,
    /// Depth test enabled
    pub depth_test: bool,
    /// Active blend function
    pub blend: BlendFunc,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            projection: Mat4::identity(),
            model_view: Mat4::identity(),
            lighting: true,
            cull_face: true,
            depth_test: true,
            blend: BlendFunc::ALPHA,
        }
    }
}

impl GraphicsState {
    /// Whether `capability` is enabled
    pub fn is_enabled(&self, capability: Capability) -> bool {
        match capability {
            Capability::Lighting => self.lighting,
            Capability::CullFace => self.cull_face,
            Capability::DepthTest => self.depth_test,
        }
    }

    /// Enable or disable `capability`
    pub fn set_enabled(&mut self, capability: Capability, enabled: bool) {
        match capability {
            Capability::Lighting => self.lighting = enabled,
            Capability::CullFace => self.cull_face = enabled,
            Capability::DepthTest => self.depth_test = enabled,
        }
    }
}

/// Pushes backend state on creation and pops it on drop
///
/// Dereferences to the backend so state changes go through the guard and
/// are undone on every exit path, including unwinding.
pub struct StateScope<'a, B: RenderBackend + ?Sized> {
    backend: &'a mut B,
}

impl<'a, B: RenderBackend + ?Sized> StateScope<'a, B> {
    /// Save the backend state
    pub fn new(backend: &'a mut B) -> Self {
        backend.push_state();
        Self { backend }
    }
}

impl<B: RenderBackend + ?Sized> Deref for StateScope<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.backend
    }
}

impl<B: RenderBackend + ?Sized> DerefMut for StateScope<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.backend
    }
}

impl<B: RenderBackend + ?Sized> Drop for StateScope<'_, B> {
    fn drop(&mut self) {
        self.backend.pop_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessBackend;

    #[test]
    fn test_scope_restores_state_on_drop() {
        let mut backend = HeadlessBackend::new();
        let before = backend.state().clone();

        {
            let mut scope = StateScope::new(&mut backend);
            scope.set_capability(Capability::DepthTest, false);
            scope.set_blend_func(BlendFunc::ADDITIVE);
            assert!(!scope.state().depth_test);
            assert_eq!(scope.stack_depth(), 1);
        }

        assert_eq!(backend.state(), &before);
        assert_eq!(backend.stack_depth(), 0);
    }

    #[test]
    fn test_capability_accessors() {
        let mut state = GraphicsState::default();
        assert!(state.is_enabled(Capability::CullFace));
        state.set_enabled(Capability::CullFace, false);
        assert!(!state.is_enabled(Capability::CullFace));
    }
}
