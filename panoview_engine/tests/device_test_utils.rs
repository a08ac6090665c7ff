#![allow(dead_code)]
//! Recording graphics device shared by the integration tests
//!
//! Backends live outside this crate, so integration tests plug in this
//! small device built only on the public `render` traits. Every recorded
//! command is pushed as a readable string into a log the test keeps a
//! handle on.

use std::sync::{Arc, Mutex};

use panoview_engine::panoview::Result;
use panoview_engine::panoview::render::{
    BlendMode, ClearValue, CommandList, GraphicsDevice, Mesh, MeshDesc, RenderTarget,
    RenderTargetDesc, ShaderProgram, ShaderProgramDesc, SharedGraphicsDevice, Texture,
    TextureDesc, TextureFormat, TextureInfo, TextureKind, UniformSet, Viewport,
};

pub type CommandLog = Arc<Mutex<Vec<String>>>;

struct RecordedTexture {
    info: TextureInfo,
}

impl Texture for RecordedTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

struct RecordedTarget {
    name: String,
    width: u32,
    height: u32,
    format: TextureFormat,
    texture: Arc<dyn Texture>,
}

impl RenderTarget for RecordedTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> TextureFormat {
        self.format
    }

    fn color_texture(&self) -> Arc<dyn Texture> {
        self.texture.clone()
    }
}

struct RecordedProgram {
    name: String,
    uniforms: Vec<String>,
}

impl ShaderProgram for RecordedProgram {
    fn name(&self) -> &str {
        &self.name
    }

    fn uniforms(&self) -> &[String] {
        &self.uniforms
    }
}

pub struct RecordedMesh {
    pub name: String,
}

impl Mesh for RecordedMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn vertex_count(&self) -> u32 {
        3
    }

    fn index_count(&self) -> u32 {
        3
    }
}

struct RecordingCommandList {
    log: CommandLog,
}

impl RecordingCommandList {
    fn push(&self, command: String) -> Result<()> {
        self.log.lock().unwrap().push(command);
        Ok(())
    }
}

impl CommandList for RecordingCommandList {
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.push(format!("set_viewport {} {} {} {}",
            viewport.x, viewport.y, viewport.width, viewport.height))
    }

    fn begin_pass(&mut self, target: Option<&Arc<dyn RenderTarget>>, clear: Option<ClearValue>) -> Result<()> {
        let target = target.map(|t| t.name().to_string()).unwrap_or_else(|| "screen".to_string());
        let load = if clear.is_some() { "clear" } else { "load" };
        self.push(format!("begin_pass {} {}", target, load))
    }

    fn bind_program(&mut self, program: &Arc<dyn ShaderProgram>, _uniforms: &UniformSet) -> Result<()> {
        self.push(format!("bind_program {}", program.name()))
    }

    fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) -> Result<()> {
        self.push(format!("bind_texture {} {}", slot, texture.info().name))
    }

    fn set_blend(&mut self, mode: BlendMode) -> Result<()> {
        self.push(format!("set_blend {:?}", mode))
    }

    fn draw_fullscreen(&mut self) -> Result<()> {
        self.push("draw_fullscreen".to_string())
    }

    fn draw_mesh(&mut self, mesh: &Arc<dyn Mesh>) -> Result<()> {
        self.push(format!("draw_mesh {}", mesh.name()))
    }

    fn end_pass(&mut self) -> Result<()> {
        self.push("end_pass".to_string())
    }
}

/// Device that only records what it is asked to do
pub struct RecordingDevice {
    pub commands: CommandLog,
    pub submits: Arc<Mutex<u32>>,
    pub size: Arc<Mutex<(u32, u32)>>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            submits: Arc::new(Mutex::new(0)),
            size: Arc::new(Mutex::new((0, 0))),
        }
    }
}

impl GraphicsDevice for RecordingDevice {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        Ok(Arc::new(RecordedTexture {
            info: TextureInfo {
                name: desc.name,
                width: desc.width,
                height: desc.height,
                format: desc.format,
                kind: desc.kind,
            },
        }))
    }

    fn update_texture(&mut self, _texture: &Arc<dyn Texture>, _layer: u32, _data: &[u8]) -> Result<()> {
        Ok(())
    }

    fn create_render_target(&mut self, desc: RenderTargetDesc) -> Result<Arc<dyn RenderTarget>> {
        let texture = Arc::new(RecordedTexture {
            info: TextureInfo {
                name: desc.name.clone(),
                width: desc.width,
                height: desc.height,
                format: desc.format,
                kind: TextureKind::D2,
            },
        });
        Ok(Arc::new(RecordedTarget {
            name: desc.name,
            width: desc.width,
            height: desc.height,
            format: desc.format,
            texture,
        }))
    }

    fn create_shader_program(&mut self, desc: &ShaderProgramDesc) -> Result<Arc<dyn ShaderProgram>> {
        Ok(Arc::new(RecordedProgram {
            name: desc.name.clone(),
            uniforms: desc.uniforms.clone(),
        }))
    }

    fn create_mesh(&mut self, desc: MeshDesc) -> Result<Arc<dyn Mesh>> {
        Ok(Arc::new(RecordedMesh { name: desc.name }))
    }

    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(RecordingCommandList { log: self.commands.clone() }))
    }

    fn submit(&mut self, _commands: Box<dyn CommandList>) -> Result<()> {
        *self.submits.lock().unwrap() += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self.size.lock().unwrap() = (width, height);
    }
}

/// Handles kept by the test after the device moved into the engine
pub struct DeviceHandles {
    pub commands: CommandLog,
    pub submits: Arc<Mutex<u32>>,
    pub size: Arc<Mutex<(u32, u32)>>,
}

impl DeviceHandles {
    pub fn take_commands(&self) -> Vec<String> {
        std::mem::take(&mut *self.commands.lock().unwrap())
    }

    pub fn submit_count(&self) -> u32 {
        *self.submits.lock().unwrap()
    }
}

/// Create a shared recording device plus the handles to inspect it
pub fn create_recording_device() -> (SharedGraphicsDevice, DeviceHandles) {
    let device = RecordingDevice::new();
    let handles = DeviceHandles {
        commands: device.commands.clone(),
        submits: device.submits.clone(),
        size: device.size.clone(),
    };
    (Arc::new(Mutex::new(device)), handles)
}
