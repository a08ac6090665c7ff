/// Render pipeline module - post-processing compositor
///
/// A main compositor (background texture, scene additions, global
/// effects) fed by one scene and one picking sub-compositor per render
/// scene.

pub mod pass;
pub mod compositor;
pub mod effects;
pub mod render_scene;
pub mod render_pipeline;
pub(crate) mod shaders;

pub use pass::{CompositorKey, Pass, PassKind, PassPosition};
pub use compositor::{Compositor, CompositorRole};
pub use effects::{EffectDescriptor, EffectRegistry, StaticEffectRegistry};
pub use render_scene::{RenderScene, SceneDrawable};
pub use render_pipeline::{PipelineConfig, RenderPipeline};
