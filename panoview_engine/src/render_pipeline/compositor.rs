/// Compositor - ordered passes over a pair of ping-pong buffers.

use std::sync::Arc;

use crate::error::Result;
use crate::graphics_device::{
    CommandList, GraphicsDevice, RenderTarget, RenderTargetDesc, TextureFormat, Texture,
};
use crate::math::Resolution;
use super::pass::{FrameState, Pass, PassKind, PassTargets};

/// Role of a compositor in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositorRole {
    Main,
    /// Ordinary scene shading, blended into main
    Scene,
    /// Id / selection buffer, never blended into main
    Picking,
}

pub struct Compositor {
    name: String,
    role: CompositorRole,
    passes: Vec<Pass>,
    read_buffer: Arc<dyn RenderTarget>,
    write_buffer: Arc<dyn RenderTarget>,
    /// The write buffer was provided by the caller and may be shared
    external_target: bool,
    /// Resolution factor of the internal buffers
    scale: f32,
    enabled: bool,
    output: Option<Arc<dyn RenderTarget>>,
}

impl Compositor {
    /// Create a compositor with its own buffers, or writing into `target`.
    pub fn new(
        device: &mut dyn GraphicsDevice,
        name: &str,
        role: CompositorRole,
        resolution: Resolution,
        scale: f32,
        target: Option<Arc<dyn RenderTarget>>,
    ) -> Result<Self> {
        let size = resolution.scaled(scale);
        let read_buffer = create_buffer(device, &format!("{}_read", name), size, role)?;
        let external_target = target.is_some();
        let write_buffer = match target {
            Some(target) => target,
            None => create_buffer(device, &format!("{}_write", name), size, role)?,
        };
        Ok(Self {
            name: name.to_string(),
            role,
            passes: Vec::new(),
            read_buffer,
            write_buffer,
            external_target,
            scale,
            enabled: true,
            output: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> CompositorRole {
        self.role
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn passes_mut(&mut self) -> &mut Vec<Pass> {
        &mut self.passes
    }

    pub fn add_pass(&mut self, pass: Pass) {
        self.passes.push(pass);
    }

    pub fn insert_pass(&mut self, index: usize, pass: Pass) {
        let index = index.min(self.passes.len());
        self.passes.insert(index, pass);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Buffer scene passes write into (shared between compositors when
    /// an external target was given)
    pub fn target(&self) -> &Arc<dyn RenderTarget> {
        &self.write_buffer
    }

    pub fn has_external_target(&self) -> bool {
        self.external_target
    }

    /// Redirect output to a caller-owned target
    pub fn set_target(&mut self, target: Arc<dyn RenderTarget>) {
        self.write_buffer = target;
        self.external_target = true;
        self.output = None;
    }

    pub fn shares_target_with(&self, other: &Compositor) -> bool {
        Arc::ptr_eq(&self.write_buffer, &other.write_buffer)
    }

    /// Last buffer written during the previous `render`
    pub fn output(&self) -> Option<&Arc<dyn RenderTarget>> {
        self.output.as_ref()
    }

    pub fn output_texture(&self) -> Option<Arc<dyn Texture>> {
        self.output.as_ref().map(|target| target.color_texture())
    }

    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.read_buffer, &mut self.write_buffer);
    }

    /// Recreate the internal buffers at the new size. External targets
    /// belong to their owner and are kept.
    pub fn set_size(&mut self, device: &mut dyn GraphicsDevice, resolution: Resolution) -> Result<()> {
        let size = resolution.scaled(self.scale);
        let texel = resolution.texel_size();
        self.read_buffer = create_buffer(device, &format!("{}_read", self.name), size, self.role)?;
        if !self.external_target {
            self.write_buffer = create_buffer(device, &format!("{}_write", self.name), size, self.role)?;
        }
        self.output = None;
        for pass in self.passes.iter_mut() {
            pass.set_resolution(texel);
        }
        Ok(())
    }

    /// Run every enabled pass in order.
    pub(crate) fn render<F>(
        &mut self,
        cmd: &mut dyn CommandList,
        frame: &FrameState<'_>,
        addition_source: F,
    ) -> Result<()>
    where
        F: Fn(&PassKind) -> Option<Arc<dyn Texture>>,
    {
        for index in 0..self.passes.len() {
            if !self.passes[index].enabled {
                continue;
            }
            let source = addition_source(&self.passes[index].kind);
            let targets = PassTargets {
                read: &self.read_buffer,
                write: &self.write_buffer,
                addition_source: source,
            };
            let written = self.passes[index].execute(cmd, targets, frame)?;
            let pass = &self.passes[index];
            if written.is_some() {
                self.output = written;
            }
            if pass.needs_swap && !pass.render_to_screen {
                self.swap_buffers();
            }
        }
        Ok(())
    }
}

fn create_buffer(
    device: &mut dyn GraphicsDevice,
    name: &str,
    size: Resolution,
    role: CompositorRole,
) -> Result<Arc<dyn RenderTarget>> {
    device.create_render_target(RenderTargetDesc {
        name: name.to_string(),
        width: size.width,
        height: size.height,
        format: match role {
            CompositorRole::Picking => TextureFormat::R8G8B8A8_UNORM,
            _ => TextureFormat::R16G16B16A16_SFLOAT,
        },
        depth: role != CompositorRole::Main,
    })
}
