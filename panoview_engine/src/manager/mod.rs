/// Manager module - scene-driven orchestration of camera, background and pipeline

pub mod scene_config;
pub mod display;
pub mod render_manager;

pub use scene_config::{MediaConfig, MediaSourceConfig, RenderConfig, SceneConfig, ViewConfig};
pub use display::{DisplayDevice, MonoDisplay, RenderParams, SideBySideStereoDisplay};
pub use render_manager::RenderManager;
