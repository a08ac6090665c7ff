/// Flat view - 2D media on the z = -1 plane, seen by an orthographic camera.
///
/// Pan (the camera's yaw/pitch) is expressed in canvas units: the canvas
/// spans `[-aspect, aspect] × [-1, 1]`. Mapping functions work on plane
/// points rather than unit directions.

use std::f32::consts::PI;
use glam::{Vec2, Vec3};
use super::{ViewContext, ViewLimits, screen_to_ndc, ndc_to_screen};

/// Canvas aspect used until the media reports its own
pub const DEFAULT_FLAT_ASPECT: f32 = 2.0;

const FLAT_LIMITS: ViewLimits = ViewLimits {
    yaw_min: f32::NEG_INFINITY,
    yaw_max: f32::INFINITY,
    pitch_min: f32::NEG_INFINITY,
    pitch_max: f32::INFINITY,
    roll_min: 0.0,
    roll_max: 0.0,
    fov_min: 10.0 * (PI / 180.0),
    fov_max: 120.0 * (PI / 180.0),
};

#[derive(Debug, Clone, PartialEq)]
pub struct FlatView {
    limits: ViewLimits,
    /// Canvas half extents
    canvas: Vec2,
}

impl FlatView {
    pub fn new() -> Self {
        Self::with_aspect(DEFAULT_FLAT_ASPECT)
    }

    pub fn with_aspect(media_aspect: f32) -> Self {
        let aspect = if media_aspect.is_finite() && media_aspect > 0.0 {
            media_aspect
        } else {
            DEFAULT_FLAT_ASPECT
        };
        Self {
            limits: FLAT_LIMITS,
            canvas: Vec2::new(aspect, 1.0),
        }
    }

    pub fn limits(&self) -> &ViewLimits {
        &self.limits
    }

    pub fn canvas_half_extent(&self) -> Vec2 {
        self.canvas
    }

    fn visible_half_extent(ctx: &ViewContext) -> Vec2 {
        let zoom = if ctx.zoom > 0.0 { ctx.zoom } else { 1.0 };
        Vec2::new(ctx.resolution.aspect() / zoom, 1.0 / zoom)
    }

    /// Plane point under `point`, `None` off the canvas.
    pub fn screen_to_world(&self, ctx: &ViewContext, point: Vec2) -> Option<Vec3> {
        let ndc = screen_to_ndc(point, ctx.resolution)?;
        let plane = ctx.pan + ndc * Self::visible_half_extent(ctx);
        if plane.x.abs() > self.canvas.x || plane.y.abs() > self.canvas.y {
            return None;
        }
        Some(plane.extend(-1.0))
    }

    pub fn world_to_screen(&self, ctx: &ViewContext, point: Vec3) -> Option<Vec2> {
        if point.z > -1e-6 {
            return None;
        }
        let plane = point.truncate() / -point.z;
        let ndc = (plane - ctx.pan) / Self::visible_half_extent(ctx);
        ndc_to_screen(ndc, ctx.resolution)
    }
}

impl Default for FlatView {
    fn default() -> Self {
        Self::new()
    }
}
