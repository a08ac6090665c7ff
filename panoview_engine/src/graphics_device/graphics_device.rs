/// GraphicsDevice trait - factory for GPU resources and command submission

use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::graphics_device::{
    CommandList, Mesh, MeshDesc, RenderTarget, RenderTargetDesc,
    ShaderProgram, ShaderProgramDesc, Texture, TextureDesc,
};

/// Shared, lockable device handle
pub type SharedGraphicsDevice = Arc<Mutex<dyn GraphicsDevice>>;

/// Main graphics device trait
///
/// This is the central factory interface for creating GPU resources.
/// Resources are reference counted and destroyed when the last `Arc`
/// is dropped.
pub trait GraphicsDevice: Send {
    /// Create a texture
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor (size, format, layers, initial data)
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Upload new pixel data to one layer of an existing texture
    ///
    /// # Arguments
    ///
    /// * `texture` - Texture to update
    /// * `layer` - Target layer (0 for 2D textures, 0..6 for cube maps)
    /// * `data` - Raw RGBA8 bytes for the whole layer
    fn update_texture(&mut self, texture: &Arc<dyn Texture>, layer: u32, data: &[u8]) -> Result<()>;

    /// Create an offscreen color target that can also be sampled
    fn create_render_target(&mut self, desc: RenderTargetDesc) -> Result<Arc<dyn RenderTarget>>;

    /// Compile and link a shader program
    fn create_shader_program(&mut self, desc: &ShaderProgramDesc) -> Result<Arc<dyn ShaderProgram>>;

    /// Upload an indexed mesh
    fn create_mesh(&mut self, desc: MeshDesc) -> Result<Arc<dyn Mesh>>;

    /// Create a command list for recording one frame (or one eye)
    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>>;

    /// Submit a recorded command list for execution
    fn submit(&mut self, commands: Box<dyn CommandList>) -> Result<()>;

    /// Notify the device that the drawing surface has been resized
    fn resize(&mut self, width: u32, height: u32);

    /// Wait for all GPU operations to complete
    fn wait_idle(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Lock a shared device, mapping a poisoned lock to a backend error
pub fn lock_device(
    device: &SharedGraphicsDevice,
) -> Result<std::sync::MutexGuard<'_, dyn GraphicsDevice + 'static>> {
    device.lock().map_err(|_| crate::engine_err!("panoview::GraphicsDevice",
        "graphics device lock poisoned"))
}
