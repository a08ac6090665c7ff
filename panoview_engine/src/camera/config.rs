/// Camera configuration as provided by the story / scene collaborator.
///
/// Angles are in degrees at this boundary. Absent `min`/`max` mean the
/// axis is unbounded at the camera level (the view may still limit it).

use serde::Deserialize;
use crate::math::to_radians;

/// Default vertical fov (degrees) when neither story nor scene sets one
pub const DEFAULT_FOV_DEGREES: f32 = 90.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub default: Option<f32>,
}

impl AxisConfig {
    pub fn new(min: Option<f32>, max: Option<f32>, default: Option<f32>) -> Self {
        Self { min, max, default }
    }

    /// Field-wise overlay, `over` wins where set
    pub fn overlay(&self, over: &AxisConfig) -> AxisConfig {
        AxisConfig {
            min: over.min.or(self.min),
            max: over.max.or(self.max),
            default: over.default.or(self.default),
        }
    }

    /// (min, max) in radians, ±∞ when absent
    pub fn bounds_radians(&self) -> (f32, f32) {
        (
            self.min.map(to_radians).unwrap_or(f32::NEG_INFINITY),
            self.max.map(to_radians).unwrap_or(f32::INFINITY),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub yaw: AxisConfig,
    pub pitch: AxisConfig,
    pub roll: AxisConfig,
    pub fov: AxisConfig,
    /// Motion parallax factor, [0, 1]
    pub parallax: Option<f32>,
    /// Keep the current navigation state across scene loads
    pub keep: Option<bool>,
}

impl CameraConfig {
    /// Overlay the scene camera config on the story one.
    pub fn merged(story: &CameraConfig, scene: &CameraConfig) -> CameraConfig {
        CameraConfig {
            yaw: story.yaw.overlay(&scene.yaw),
            pitch: story.pitch.overlay(&scene.pitch),
            roll: story.roll.overlay(&scene.roll),
            fov: story.fov.overlay(&scene.fov),
            parallax: scene.parallax.or(story.parallax),
            keep: scene.keep.or(story.keep),
        }
    }

    pub fn parallax_factor(&self) -> f32 {
        match self.parallax {
            Some(p) if p.is_finite() => p.clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn keep_state(&self) -> bool {
        self.keep.unwrap_or(false)
    }
}

/// Camera-level bounds, radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBounds {
    pub yaw_min: f32,
    pub yaw_max: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub roll_min: f32,
    pub roll_max: f32,
    pub fov_min: f32,
    pub fov_max: f32,
}

impl CameraBounds {
    pub const UNBOUNDED: Self = Self {
        yaw_min: f32::NEG_INFINITY,
        yaw_max: f32::INFINITY,
        pitch_min: f32::NEG_INFINITY,
        pitch_max: f32::INFINITY,
        roll_min: f32::NEG_INFINITY,
        roll_max: f32::INFINITY,
        fov_min: f32::NEG_INFINITY,
        fov_max: f32::INFINITY,
    };

    pub fn from_config(config: &CameraConfig) -> Self {
        let (yaw_min, yaw_max) = config.yaw.bounds_radians();
        let (pitch_min, pitch_max) = config.pitch.bounds_radians();
        let (roll_min, roll_max) = config.roll.bounds_radians();
        let (fov_min, fov_max) = config.fov.bounds_radians();
        Self { yaw_min, yaw_max, pitch_min, pitch_max, roll_min, roll_max, fov_min, fov_max }
    }
}

impl Default for CameraBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
