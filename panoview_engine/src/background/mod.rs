/// Background module - draws the panoramic media before any scene or effect

pub mod media;
pub mod geometry;
pub mod uniforms;
pub mod background_renderer;
mod shaders;

pub use media::{MediaAsset, MediaFormat, MediaSurface, StaticMedia, SurfacePixels};
pub use uniforms::{BackgroundUniforms, ProjectionMode};
pub use background_renderer::{
    select_background_kind, BackgroundConfig, BackgroundKind, BackgroundRenderer,
};
