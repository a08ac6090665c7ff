/// Scene and render configuration.
///
/// `SceneConfig` mirrors the fields the story manager hands over on scene
/// load; the rest of its schema is not read here. `RenderConfig` holds the
/// engine-side settings consumed by `RenderManager::new`.

use serde::Deserialize;

use crate::background::{BackgroundConfig, MediaFormat};
use crate::camera::{CameraConfig, DEFAULT_FAR, DEFAULT_NEAR};
use crate::engine_err;
use crate::error::Result;
use crate::math::Resolution;
use crate::render_pipeline::PipelineConfig;
use crate::view::ViewType;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    #[serde(rename = "type")]
    pub view_type: Option<String>,
}

impl ViewConfig {
    /// Requested view type, rectilinear when absent.
    /// An unknown type is an `UnsupportedType` error.
    pub fn resolve(&self) -> Result<ViewType> {
        match &self.view_type {
            Some(name) => name.parse(),
            None => Ok(ViewType::Rectilinear),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaSourceConfig {
    pub format: Option<MediaFormat>,
    /// Horizontal coverage of the media, degrees
    pub fov: Option<f32>,
    /// Tile size of tiled (multi-resolution) sources, pixels
    pub tile: Option<u32>,
    /// Cube face order, e.g. "RLUDFB"
    pub order: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub source: MediaSourceConfig,
    /// Effect set applied to the background
    pub fx: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub view: ViewConfig,
    pub camera: CameraConfig,
    pub media: MediaConfig,
    /// Global effect set
    pub fx: Option<String>,
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            engine_err!("panoview::SceneConfig", InvalidConfig => "scene config: {}", err)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Initial output size, replaced by the display size on the first change
    pub resolution: Resolution,
    pub clear_color: [f32; 4],
    pub sphere_segments: (u32, u32),
    pub background_radius: f32,
    pub near: f32,
    pub far: f32,
    /// Distance between the eyes in stereo rendering, world units
    pub eye_separation: f32,
    /// Resolution factor of the picking buffers
    pub picking_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let background = BackgroundConfig::default();
        Self {
            resolution: Resolution::new(1280, 720),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            sphere_segments: background.sphere_segments,
            background_radius: background.radius,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            eye_separation: 0.064,
            picking_scale: 0.5,
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            engine_err!("panoview::RenderConfig", InvalidConfig => "render config: {}", err)
        })
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            clear_color: self.clear_color,
            picking_scale: self.picking_scale,
        }
    }

    pub fn background_config(&self) -> BackgroundConfig {
        BackgroundConfig {
            sphere_segments: self.sphere_segments,
            radius: self.background_radius,
            clear_color: self.clear_color,
        }
    }
}

#[cfg(test)]
#[path = "scene_config_tests.rs"]
mod tests;
