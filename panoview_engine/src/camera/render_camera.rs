/// RenderCamera - per-frame, per-eye passive snapshot of the camera.
///
/// Built by `Camera::render_camera()` and handed to the background
/// renderer, the pipeline passes and the display device. It computes
/// nothing; it only carries what was derived in `Camera::update()`.

use glam::{Mat4, Quat, Vec2, Vec3};
use crate::graphics_device::Viewport;

/// Which eye a snapshot renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Eye {
    #[default]
    Mono,
    Left,
    Right,
}

impl Eye {
    /// -1 for the left eye, +1 for the right, 0 for mono
    pub fn sign(&self) -> f32 {
        match self {
            Eye::Mono => 0.0,
            Eye::Left => -1.0,
            Eye::Right => 1.0,
        }
    }
}

/// Projection used for the snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionKind {
    /// `fov` is the projection fov (after view conversion)
    Perspective { fov: f32 },
    /// Flat view
    Orthographic { pan: Vec2, zoom: f32 },
}

#[derive(Debug, Clone)]
pub struct RenderCamera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    viewport: Viewport,
    position: Vec3,
    orientation: Quat,
    projection: ProjectionKind,
    eye: Eye,
}

impl RenderCamera {
    pub fn new(view: Mat4, projection_matrix: Mat4, projection: ProjectionKind, viewport: Viewport) -> Self {
        Self {
            view_matrix: view,
            projection_matrix,
            viewport,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            projection,
            eye: Eye::Mono,
        }
    }

    pub fn with_pose(mut self, position: Vec3, orientation: Quat) -> Self {
        self.position = position;
        self.orientation = orientation;
        self
    }

    pub fn with_eye(mut self, eye: Eye) -> Self {
        self.eye = eye;
        self
    }

    // ===== GETTERS =====

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn projection(&self) -> ProjectionKind {
        self.projection
    }

    pub fn eye(&self) -> Eye {
        self.eye
    }

    // ===== SETTERS =====

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
#[path = "render_camera_tests.rs"]
mod tests;
