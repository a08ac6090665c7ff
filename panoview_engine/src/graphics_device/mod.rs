/// Graphics device module - GPU abstraction used by the render pipeline
///
/// Backends (WebGL-like, wgpu, ...) implement these traits. The engine
/// only ever talks to `dyn GraphicsDevice` and the resource traits.

pub mod graphics_device;
pub mod texture;
pub mod render_target;
pub mod shader;
pub mod mesh;
pub mod command_list;

pub use graphics_device::*;
pub use texture::*;
pub use render_target::*;
pub use shader::*;
pub use mesh::*;
pub use command_list::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
