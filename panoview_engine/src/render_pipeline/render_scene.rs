/// Render scenes - scene-graph subsets drawn by the scene and picking
/// sub-compositors.

use std::sync::Arc;
use crate::camera::RenderCamera;
use crate::error::Result;
use crate::graphics_device::{CommandList, RenderTarget, ShaderProgram};

/// Something the pipeline can draw inside a scene pass.
///
/// `material` is set for picking passes: the drawable must render ids
/// with it instead of its own shading.
pub trait SceneDrawable: Send + Sync {
    fn draw(
        &self,
        cmd: &mut dyn CommandList,
        camera: &RenderCamera,
        material: Option<&Arc<dyn ShaderProgram>>,
    ) -> Result<()>;
}

/// A logical render scene: one drawable, optionally rendered into a
/// target shared with other scenes.
#[derive(Clone)]
pub struct RenderScene {
    pub name: String,
    pub drawable: Arc<dyn SceneDrawable>,
    /// Scene compositor output. `None` allocates a private buffer.
    pub target: Option<Arc<dyn RenderTarget>>,
    /// Picking compositor output. `None` allocates a private buffer.
    pub picking_target: Option<Arc<dyn RenderTarget>>,
}

impl RenderScene {
    pub fn new(name: &str, drawable: Arc<dyn SceneDrawable>) -> Self {
        Self {
            name: name.to_string(),
            drawable,
            target: None,
            picking_target: None,
        }
    }

    pub fn with_target(mut self, target: Arc<dyn RenderTarget>) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_picking_target(mut self, target: Arc<dyn RenderTarget>) -> Self {
        self.picking_target = Some(target);
        self
    }
}
