/// CameraPose - one canonical orientation with cached derived forms.
///
/// The quaternion is the single source of truth. Euler angles and the
/// rotation matrix are derived from it once, at construction, so callers
/// can never observe a matrix that disagrees with the angles.
///
/// Euler order is YXZ: yaw about world +Y, then pitch about the local +X,
/// then roll about the view axis. The camera looks down -Z.

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    quaternion: Quat,
    euler: (f32, f32, f32),
    matrix: Mat4,
}

impl CameraPose {
    pub const IDENTITY: Self = Self {
        quaternion: Quat::IDENTITY,
        euler: (0.0, 0.0, 0.0),
        matrix: Mat4::IDENTITY,
    };

    /// Build from yaw / pitch / roll (radians).
    pub fn from_euler(yaw: f32, pitch: f32, roll: f32) -> Self {
        let quaternion = Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll);
        Self {
            quaternion,
            euler: (yaw, pitch, roll),
            matrix: Mat4::from_quat(quaternion),
        }
    }

    /// Build from a rotation quaternion (normalized on entry).
    pub fn from_quaternion(quaternion: Quat) -> Self {
        let quaternion = quaternion.normalize();
        Self {
            quaternion,
            euler: quaternion.to_euler(EulerRot::YXZ),
            matrix: Mat4::from_quat(quaternion),
        }
    }

    /// Build from a model-view (view) matrix.
    ///
    /// The view matrix holds the inverse camera rotation, so the rotation
    /// part is transposed before decomposition. Translation is ignored.
    pub fn from_view_matrix(view: &Mat4) -> Self {
        let rotation = Mat3::from_mat4(*view).transpose();
        Self::from_quaternion(Quat::from_mat3(&rotation))
    }

    /// Camera rotation (world from view)
    pub fn quaternion(&self) -> Quat {
        self.quaternion
    }

    /// (yaw, pitch, roll) in radians
    pub fn euler(&self) -> (f32, f32, f32) {
        self.euler
    }

    /// Rotation matrix (world from view)
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Inverse rotation (view from world), i.e. the rotation part of the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        self.matrix.transpose()
    }

    /// World-space forward direction (-Z rotated)
    pub fn forward(&self) -> Vec3 {
        self.quaternion * Vec3::NEG_Z
    }

    /// World-space right direction (+X rotated)
    pub fn right(&self) -> Vec3 {
        self.quaternion * Vec3::X
    }

    /// World-space up direction (+Y rotated)
    pub fn up(&self) -> Vec3 {
        self.quaternion * Vec3::Y
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
#[path = "pose_tests.rs"]
mod tests;
