/// RenderTarget trait - offscreen color buffer that can be sampled afterwards

use std::sync::Arc;
use crate::graphics_device::{Texture, TextureFormat};

/// Descriptor for creating a render target
#[derive(Debug, Clone)]
pub struct RenderTargetDesc {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    /// Attach a depth buffer (scene compositors)
    pub depth: bool,
}

/// Render target trait
pub trait RenderTarget: Send + Sync {
    fn name(&self) -> &str;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn format(&self) -> TextureFormat;

    /// Color attachment, for sampling in a later pass
    fn color_texture(&self) -> Arc<dyn Texture>;
}

/// Identity comparison for shared render targets
pub fn same_target(a: &Arc<dyn RenderTarget>, b: &Arc<dyn RenderTarget>) -> bool {
    Arc::ptr_eq(a, b)
}
