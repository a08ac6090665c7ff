/// Perspective and orthographic projection state derived by `Camera::update()`.

use glam::{Mat4, Vec2, Vec3};

pub const DEFAULT_NEAR: f32 = 0.01;
pub const DEFAULT_FAR: f32 = 100.0;

/// Perspective camera used by spherical views
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveProjection {
    /// Projection fov (already converted by the view), radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// World position (parallax / fisheye pull-back)
    pub position: Vec3,
    pub view_matrix: Mat4,
}

impl PerspectiveProjection {
    pub fn new(near: f32, far: f32) -> Self {
        Self {
            fov: std::f32::consts::FRAC_PI_2,
            aspect: 1.0,
            near,
            far,
            position: Vec3::ZERO,
            view_matrix: Mat4::IDENTITY,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix_with_aspect(self.aspect)
    }

    /// Projection for a viewport with a different aspect (stereo halves)
    pub fn matrix_with_aspect(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

/// Orthographic camera used by the flat view.
///
/// Base bounds are `±aspect × ±1`; `zoom` divides them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicProjection {
    pub aspect: f32,
    pub zoom: f32,
    pub near: f32,
    pub far: f32,
    /// Pan offset on the media plane
    pub pan: Vec2,
}

impl OrthographicProjection {
    pub fn new(near: f32, far: f32) -> Self {
        Self { aspect: 1.0, zoom: 1.0, near, far, pan: Vec2::ZERO }
    }

    pub fn left(&self) -> f32 {
        -self.aspect / self.zoom
    }

    pub fn right(&self) -> f32 {
        self.aspect / self.zoom
    }

    pub fn top(&self) -> f32 {
        1.0 / self.zoom
    }

    pub fn bottom(&self) -> f32 {
        -1.0 / self.zoom
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix_with_aspect(self.aspect)
    }

    pub fn matrix_with_aspect(&self, aspect: f32) -> Mat4 {
        let half_w = aspect / self.zoom;
        let half_h = 1.0 / self.zoom;
        Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(-self.pan.x, -self.pan.y, 0.0))
    }
}
