/// Mock graphics device for unit tests (no GPU required)
///
/// Every created resource is named and every recorded command is pushed
/// as a readable string into a log shared with the device, so tests can
/// assert on pass ordering and clear flags.

use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::{
    GraphicsDevice, CommandList, Texture, TextureDesc, TextureInfo, RenderTarget,
    RenderTargetDesc, ShaderProgram, ShaderProgramDesc, Mesh, MeshDesc,
    TextureFormat, TextureKind, UniformSet, Viewport, ClearValue, BlendMode,
};

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
}

impl MockTexture {
    pub fn new(name: &str, width: u32, height: u32, kind: TextureKind) -> Self {
        Self {
            info: TextureInfo {
                name: name.to_string(),
                width,
                height,
                format: TextureFormat::R8G8B8A8_UNORM,
                kind,
            },
        }
    }
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock RenderTarget
// ============================================================================

pub struct MockRenderTarget {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub texture: Arc<dyn Texture>,
}

impl MockRenderTarget {
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            format: TextureFormat::R8G8B8A8_UNORM,
            texture: Arc::new(MockTexture::new(name, width, height, TextureKind::D2)),
        }
    }
}

impl RenderTarget for MockRenderTarget {
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

// ============================================================================
// Mock ShaderProgram
// ============================================================================

#[derive(Debug)]
pub struct MockShaderProgram {
    pub name: String,
    pub uniforms: Vec<String>,
}

impl ShaderProgram for MockShaderProgram {
    fn name(&self) -> &str {
        &self.name
    }

    fn uniforms(&self) -> &[String] {
        &self.uniforms
    }
}

// ============================================================================
// Mock Mesh
// ============================================================================

#[derive(Debug)]
pub struct MockMesh {
    pub name: String,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl Mesh for MockMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    fn index_count(&self) -> u32 {
        self.index_count
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

pub struct MockCommandList {
    commands: Arc<Mutex<Vec<String>>>,
}

impl MockCommandList {
    fn push(&self, command: String) {
        self.commands.lock().unwrap().push(command);
    }
}

impl CommandList for MockCommandList {
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.push(format!("set_viewport {} {} {} {}",
            viewport.x, viewport.y, viewport.width, viewport.height));
        Ok(())
    }

    fn begin_pass(&mut self, target: Option<&Arc<dyn RenderTarget>>, clear: Option<ClearValue>) -> Result<()> {
        let target = target.map(|t| t.name().to_string()).unwrap_or_else(|| "screen".to_string());
        let load = if clear.is_some() { "clear" } else { "load" };
        self.push(format!("begin_pass {} {}", target, load));
        Ok(())
    }

    fn bind_program(&mut self, program: &Arc<dyn ShaderProgram>, _uniforms: &UniformSet) -> Result<()> {
        self.push(format!("bind_program {}", program.name()));
        Ok(())
    }

    fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) -> Result<()> {
        self.push(format!("bind_texture {} {}", slot, texture.info().name));
        Ok(())
    }

    fn set_blend(&mut self, mode: BlendMode) -> Result<()> {
        self.push(format!("set_blend {:?}", mode));
        Ok(())
    }

    fn draw_fullscreen(&mut self) -> Result<()> {
        self.push("draw_fullscreen".to_string());
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &Arc<dyn Mesh>) -> Result<()> {
        self.push(format!("draw_mesh {}", mesh.name()));
        Ok(())
    }

    fn end_pass(&mut self) -> Result<()> {
        self.push("end_pass".to_string());
        Ok(())
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock device that tracks created resources and recorded commands
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    pub created_textures: Arc<Mutex<Vec<String>>>,
    pub created_targets: Arc<Mutex<Vec<String>>>,
    pub created_programs: Arc<Mutex<Vec<String>>>,
    pub created_meshes: Arc<Mutex<Vec<String>>>,
    pub commands: Arc<Mutex<Vec<String>>>,
    pub submit_count: Arc<Mutex<u32>>,
    pub size: (u32, u32),
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_created_textures(&self) -> Vec<String> {
        self.created_textures.lock().unwrap().clone()
    }

    pub fn get_created_targets(&self) -> Vec<String> {
        self.created_targets.lock().unwrap().clone()
    }

    pub fn get_created_programs(&self) -> Vec<String> {
        self.created_programs.lock().unwrap().clone()
    }

    pub fn get_created_meshes(&self) -> Vec<String> {
        self.created_meshes.lock().unwrap().clone()
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn clear_commands(&self) {
        self.commands.lock().unwrap().clear();
    }

    pub fn get_submit_count(&self) -> u32 {
        *self.submit_count.lock().unwrap()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if desc.width == 0 || desc.height == 0 {
            engine_bail!("panoview::mock", InvalidResource =>
                "create_texture: zero-sized texture '{}'", desc.name);
        }
        self.created_textures.lock().unwrap().push(desc.name.clone());
        Ok(Arc::new(MockTexture::new(&desc.name, desc.width, desc.height, desc.kind)))
    }

    fn update_texture(&mut self, texture: &Arc<dyn Texture>, layer: u32, _data: &[u8]) -> Result<()> {
        let info = texture.info();
        if layer >= info.kind.layer_count() {
            engine_bail!("panoview::mock", InvalidResource =>
                "update_texture: layer {} out of range for '{}'", layer, info.name);
        }
        Ok(())
    }

    fn create_render_target(&mut self, desc: RenderTargetDesc) -> Result<Arc<dyn RenderTarget>> {
        self.created_targets.lock().unwrap().push(desc.name.clone());
        Ok(Arc::new(MockRenderTarget::new(&desc.name, desc.width, desc.height)))
    }

    fn create_shader_program(&mut self, desc: &ShaderProgramDesc) -> Result<Arc<dyn ShaderProgram>> {
        self.created_programs.lock().unwrap().push(desc.name.clone());
        Ok(Arc::new(MockShaderProgram {
            name: desc.name.clone(),
            uniforms: desc.uniforms.clone(),
        }))
    }

    fn create_mesh(&mut self, desc: MeshDesc) -> Result<Arc<dyn Mesh>> {
        self.created_meshes.lock().unwrap().push(desc.name.clone());
        Ok(Arc::new(MockMesh {
            name: desc.name,
            vertex_count: desc.vertices.len() as u32,
            index_count: desc.indices.len() as u32,
        }))
    }

    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList { commands: self.commands.clone() }))
    }

    fn submit(&mut self, _commands: Box<dyn CommandList>) -> Result<()> {
        *self.submit_count.lock().unwrap() += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[path = "mock_graphics_device_tests.rs"]
mod tests;
