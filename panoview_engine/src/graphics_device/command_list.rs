/// CommandList trait - for recording rendering commands

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{Mesh, RenderTarget, ShaderProgram, Texture, UniformSet};

/// Command list for recording rendering commands
///
/// Commands are recorded and later submitted via `GraphicsDevice::submit()`.
pub trait CommandList: Send {
    /// Set the viewport for subsequent screen passes
    ///
    /// Offscreen passes always cover their whole target, whatever the
    /// viewport. On the screen the viewport scopes drawing but a backend
    /// may clear the full surface, so a frame clears the screen once before
    /// its first viewport and screen passes of each eye only load.
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Begin a pass
    ///
    /// # Arguments
    ///
    /// * `target` - Offscreen target, or `None` for the screen
    /// * `clear` - Clear color, or `None` to keep the existing content
    fn begin_pass(&mut self, target: Option<&Arc<dyn RenderTarget>>, clear: Option<ClearValue>) -> Result<()>;

    /// Bind a program together with its uniform values
    fn bind_program(&mut self, program: &Arc<dyn ShaderProgram>, uniforms: &UniformSet) -> Result<()>;

    /// Bind a texture to a sampler slot
    fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) -> Result<()>;

    /// Set the blending mode for subsequent draws
    fn set_blend(&mut self, mode: BlendMode) -> Result<()>;

    /// Draw a full-screen triangle with the bound program
    fn draw_fullscreen(&mut self) -> Result<()>;

    /// Draw an indexed mesh with the bound program
    fn draw_mesh(&mut self, mesh: &Arc<dyn Mesh>) -> Result<()>;

    /// End the current pass
    fn end_pass(&mut self) -> Result<()>;
}

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-depth viewport covering `width × height` at (x, y)
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height, min_depth: 0.0, max_depth: 1.0 }
    }

    pub fn aspect(&self) -> f32 {
        if self.height <= 0.0 { 1.0 } else { self.width / self.height }
    }
}

/// Clear value for a color attachment (RGBA)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearValue(pub [f32; 4]);

/// How a pass combines its output with the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Overwrite
    #[default]
    Replace,
    /// Standard alpha blending
    Alpha,
    /// dst + src
    Additive,
}
