/// Fisheye ("GoPro") view.
///
/// The perspective camera is pulled back by `distance` sphere radii so the
/// sphere wraps around a wider field than the projection matrix shows.
/// Screen rays start at the offset origin and are intersected with the
/// unit sphere to recover the world direction.

use std::f32::consts::PI;
use glam::{Vec2, Vec3};
use super::{ViewContext, ViewLimits, screen_to_ndc};
use super::rectilinear::project_with_fov;

/// Default camera pull-back, in sphere radii
pub const FISHEYE_DISTANCE: f32 = 1.0;

const FISHEYE_LIMITS: ViewLimits = ViewLimits {
    yaw_min: f32::NEG_INFINITY,
    yaw_max: f32::INFINITY,
    pitch_min: -75.0 * (PI / 180.0),
    pitch_max: 75.0 * (PI / 180.0),
    roll_min: -PI,
    roll_max: PI,
    fov_min: 30.0 * (PI / 180.0),
    fov_max: PI,
};

#[derive(Debug, Clone, PartialEq)]
pub struct FisheyeView {
    limits: ViewLimits,
    distance: f32,
}

impl FisheyeView {
    pub fn new() -> Self {
        Self::with_distance(FISHEYE_DISTANCE)
    }

    pub fn with_distance(distance: f32) -> Self {
        Self {
            limits: FISHEYE_LIMITS,
            distance: distance.max(0.0),
        }
    }

    pub fn limits(&self) -> &ViewLimits {
        &self.limits
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Fov of the pulled-back perspective camera that shows the same
    /// sphere area as a centered camera with `fov`.
    pub fn projection_fov(&self, fov: f32) -> f32 {
        let half = fov * 0.5;
        2.0 * (half.sin() / (self.distance + half.cos())).atan()
    }

    pub fn screen_to_world(&self, ctx: &ViewContext, point: Vec2) -> Option<Vec3> {
        let ndc = screen_to_ndc(point, ctx.resolution)?;
        let tan_half = (self.projection_fov(ctx.fov) * 0.5).tan();
        let aspect = ctx.resolution.aspect();
        let ray = Vec3::new(ndc.x * tan_half * aspect, ndc.y * tan_half, -1.0).normalize();
        let origin = Vec3::new(0.0, 0.0, self.distance);

        // |origin + t·ray| = 1, far root
        let b = origin.dot(ray);
        let c = origin.length_squared() - 1.0;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let t = -b + discriminant.sqrt();
        if t <= 0.0 {
            return None;
        }
        let hit = (origin + ray * t).normalize();

        let from_axis = (-hit.z).clamp(-1.0, 1.0).acos();
        if from_axis > self.limits.fov_max * 0.5 + 1e-5 {
            return None;
        }
        Some(ctx.orientation * hit)
    }

    pub fn world_to_screen(&self, ctx: &ViewContext, direction: Vec3, parallax: f32) -> Option<Vec2> {
        let local = ctx.orientation.inverse() * direction.try_normalize()?;
        let relative = local - Vec3::new(0.0, 0.0, self.distance + parallax);
        project_with_fov(relative, self.projection_fov(ctx.fov), ctx)
    }
}

impl Default for FisheyeView {
    fn default() -> Self {
        Self::new()
    }
}
