/// Pipeline passes.
///
/// A pass records one draw operation into a compositor. Its `position`
/// only matters for ordering inside the main compositor; `clear` and
/// `render_to_screen` are owned by `RenderPipeline` and rewritten after
/// every structural change. A pass drawing to the screen never clears it:
/// the screen is shared by every eye of a frame and is cleared once by the
/// frame owner.

use std::sync::Arc;
use glam::Vec2;
use slotmap::new_key_type;

use crate::camera::RenderCamera;
use crate::error::Result;
use crate::graphics_device::{
    BlendMode, ClearValue, CommandList, RenderTarget, ShaderProgram, Texture,
    UniformSet, UniformValue,
};
use super::render_scene::SceneDrawable;

new_key_type! {
    /// Stable key of a sub-compositor
    pub struct CompositorKey;
}

/// Ordering tag inside the main compositor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PassPosition {
    Background,
    Default,
    Global,
}

pub enum PassKind {
    /// Draw a texture (the background output) with an opacity
    TextureDraw {
        texture: Arc<dyn Texture>,
        opacity: f32,
    },
    /// Fullscreen effect sampling the previous buffer
    Shader {
        program: Arc<dyn ShaderProgram>,
    },
    /// Draw a render scene. `material` replaces the scene shading.
    Scene {
        drawable: Arc<dyn SceneDrawable>,
        material: Option<Arc<dyn ShaderProgram>>,
    },
    /// Blend a sub-compositor output additively onto the current buffer
    Addition {
        source: CompositorKey,
    },
}

impl PassKind {
    pub fn label(&self) -> &'static str {
        match self {
            PassKind::TextureDraw { .. } => "texture",
            PassKind::Shader { .. } => "shader",
            PassKind::Scene { .. } => "scene",
            PassKind::Addition { .. } => "addition",
        }
    }
}

pub struct Pass {
    pub name: String,
    pub kind: PassKind,
    pub position: PassPosition,
    pub enabled: bool,
    pub clear: bool,
    pub render_to_screen: bool,
    /// Swap the compositor buffers after this pass
    pub needs_swap: bool,
    pub uniforms: UniformSet,
}

impl Pass {
    fn with_kind(name: &str, kind: PassKind, position: PassPosition, needs_swap: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            position,
            enabled: true,
            clear: false,
            render_to_screen: false,
            needs_swap,
            uniforms: UniformSet::new(),
        }
    }

    pub fn texture(name: &str, texture: Arc<dyn Texture>, opacity: f32) -> Self {
        let mut pass = Self::with_kind(name, PassKind::TextureDraw { texture, opacity },
            PassPosition::Background, true);
        pass.uniforms.set("opacity", UniformValue::Float(opacity));
        pass
    }

    pub fn shader(name: &str, program: Arc<dyn ShaderProgram>, uniforms: UniformSet, position: PassPosition) -> Self {
        let mut pass = Self::with_kind(name, PassKind::Shader { program }, position, true);
        pass.uniforms = uniforms;
        pass
    }

    pub fn scene(name: &str, drawable: Arc<dyn SceneDrawable>) -> Self {
        Self::with_kind(name, PassKind::Scene { drawable, material: None }, PassPosition::Default, false)
    }

    pub fn addition(name: &str, source: CompositorKey) -> Self {
        Self::with_kind(name, PassKind::Addition { source }, PassPosition::Default, false)
    }

    pub fn is_shader(&self) -> bool {
        matches!(self.kind, PassKind::Shader { .. })
    }

    /// Program declares `uniform` (shader passes only)
    pub fn declares(&self, uniform: &str) -> bool {
        match &self.kind {
            PassKind::Shader { program } => program.declares(uniform),
            _ => false,
        }
    }
}

/// Per-frame values shared by every pass
pub(crate) struct FrameState<'a> {
    pub camera: &'a RenderCamera,
    pub time: f32,
    pub clear_color: [f32; 4],
    pub texture_program: &'a Arc<dyn ShaderProgram>,
    pub addition_program: &'a Arc<dyn ShaderProgram>,
}

/// Buffers a pass may read and write
pub(crate) struct PassTargets<'a> {
    pub read: &'a Arc<dyn RenderTarget>,
    pub write: &'a Arc<dyn RenderTarget>,
    /// Output of the `Addition` source, when available
    pub addition_source: Option<Arc<dyn Texture>>,
}

impl Pass {
    /// Record the pass. Returns the target written, `None` for the screen
    /// or when nothing was drawn.
    pub(crate) fn execute(
        &mut self,
        cmd: &mut dyn CommandList,
        targets: PassTargets<'_>,
        frame: &FrameState<'_>,
    ) -> Result<Option<Arc<dyn RenderTarget>>> {
        let clear = (self.clear && !self.render_to_screen).then_some(ClearValue(frame.clear_color));
        let destination = if self.render_to_screen { None } else { Some(targets.write) };

        match &self.kind {
            PassKind::TextureDraw { texture, opacity } => {
                self.uniforms.set("opacity", UniformValue::Float(*opacity));
                cmd.begin_pass(destination, clear)?;
                cmd.set_blend(if *opacity < 1.0 { BlendMode::Alpha } else { BlendMode::Replace })?;
                cmd.bind_program(frame.texture_program, &self.uniforms)?;
                cmd.bind_texture(0, texture)?;
                cmd.draw_fullscreen()?;
                cmd.end_pass()?;
                Ok(destination.cloned())
            }
            PassKind::Shader { program } => {
                if program.declares("time") {
                    self.uniforms.set("time", UniformValue::Float(frame.time));
                }
                cmd.begin_pass(destination, clear)?;
                cmd.set_blend(BlendMode::Replace)?;
                cmd.bind_program(program, &self.uniforms)?;
                cmd.bind_texture(0, &targets.read.color_texture())?;
                cmd.draw_fullscreen()?;
                cmd.end_pass()?;
                Ok(destination.cloned())
            }
            PassKind::Scene { drawable, material } => {
                cmd.begin_pass(destination, clear)?;
                drawable.draw(cmd, frame.camera, material.as_ref())?;
                cmd.end_pass()?;
                Ok(destination.cloned())
            }
            PassKind::Addition { .. } => {
                let Some(source) = targets.addition_source else {
                    return Ok(None);
                };
                if self.render_to_screen {
                    // the screen holds nothing of this eye yet: copy the current buffer first
                    cmd.begin_pass(None, None)?;
                    if !self.clear {
                        cmd.set_blend(BlendMode::Replace)?;
                        let mut copy = UniformSet::new();
                        copy.set("opacity", UniformValue::Float(1.0));
                        cmd.bind_program(frame.texture_program, &copy)?;
                        cmd.bind_texture(0, &targets.read.color_texture())?;
                        cmd.draw_fullscreen()?;
                    }
                } else {
                    cmd.begin_pass(Some(targets.read), clear)?;
                }
                cmd.set_blend(BlendMode::Additive)?;
                cmd.bind_program(frame.addition_program, &self.uniforms)?;
                cmd.bind_texture(0, &source)?;
                cmd.draw_fullscreen()?;
                cmd.end_pass()?;
                Ok(if self.render_to_screen { None } else { Some(targets.read.clone()) })
            }
        }
    }

    /// Store the `(1/width, 1/height)` resolution uniform if declared
    pub(crate) fn set_resolution(&mut self, texel_size: [f32; 2]) {
        if self.declares("resolution") {
            self.uniforms.set("resolution", UniformValue::Vec2(Vec2::from(texel_size)));
        }
    }
}
