/// Rectilinear (standard perspective) view.

use std::f32::consts::{FRAC_PI_2, PI};
use glam::{Vec2, Vec3};
use crate::math::to_radians;
use super::{ViewContext, ViewLimits, screen_to_ndc, ndc_to_screen};

const RECTILINEAR_LIMITS: ViewLimits = ViewLimits {
    yaw_min: f32::NEG_INFINITY,
    yaw_max: f32::INFINITY,
    pitch_min: -FRAC_PI_2,
    pitch_max: FRAC_PI_2,
    roll_min: -PI,
    roll_max: PI,
    fov_min: 10.0 * (PI / 180.0),
    fov_max: 120.0 * (PI / 180.0),
};

#[derive(Debug, Clone, PartialEq)]
pub struct RectilinearView {
    limits: ViewLimits,
}

impl RectilinearView {
    pub fn new() -> Self {
        Self { limits: RECTILINEAR_LIMITS }
    }

    /// Override the fov range (degrees), keeping the angular limits.
    pub fn with_fov_range(min_degrees: f32, max_degrees: f32) -> Self {
        let mut limits = RECTILINEAR_LIMITS;
        limits.fov_min = to_radians(min_degrees);
        limits.fov_max = to_radians(max_degrees);
        Self { limits }
    }

    pub fn limits(&self) -> &ViewLimits {
        &self.limits
    }

    pub fn screen_to_world(&self, ctx: &ViewContext, point: Vec2) -> Option<Vec3> {
        let ndc = screen_to_ndc(point, ctx.resolution)?;
        let tan_half = (ctx.fov * 0.5).tan();
        let aspect = ctx.resolution.aspect();
        let local = Vec3::new(ndc.x * tan_half * aspect, ndc.y * tan_half, -1.0).normalize();
        Some(ctx.orientation * local)
    }

    pub fn world_to_screen(&self, ctx: &ViewContext, direction: Vec3, parallax: f32) -> Option<Vec2> {
        let local = ctx.orientation.inverse() * direction.try_normalize()?;
        project_perspective(local - Vec3::new(0.0, 0.0, parallax), ctx)
    }
}

impl Default for RectilinearView {
    fn default() -> Self {
        Self::new()
    }
}

/// Perspective-project a camera-space point with the context's fov.
pub(super) fn project_perspective(relative: Vec3, ctx: &ViewContext) -> Option<Vec2> {
    project_with_fov(relative, ctx.fov, ctx)
}

pub(super) fn project_with_fov(relative: Vec3, fov: f32, ctx: &ViewContext) -> Option<Vec2> {
    // behind (or on) the camera plane
    if relative.z > -1e-6 {
        return None;
    }
    let tan_half = (fov * 0.5).tan();
    let depth = -relative.z;
    let ndc = Vec2::new(
        relative.x / depth / (tan_half * ctx.resolution.aspect()),
        relative.y / depth / tan_half,
    );
    ndc_to_screen(ndc, ctx.resolution)
}
