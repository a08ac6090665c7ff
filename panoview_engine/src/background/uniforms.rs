/// Uniform block of the shader (reprojection) background.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

use crate::camera::{ProjectionKind, RenderCamera};
use crate::graphics_device::{UniformSet, UniformValue};
use crate::view::ViewType;
use super::media::MediaFormat;

/// Projection applied by the reprojection shader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ProjectionMode {
    Rectilinear = 0,
    Fisheye = 1,
    Flat = 2,
}

impl From<ViewType> for ProjectionMode {
    fn from(view_type: ViewType) -> Self {
        match view_type {
            ViewType::Rectilinear => ProjectionMode::Rectilinear,
            ViewType::Fisheye => ProjectionMode::Fisheye,
            ViewType::Flat => ProjectionMode::Flat,
        }
    }
}

/// Shader code of a media format (unknown sources sample as 2D images)
pub fn format_code(format: MediaFormat) -> u32 {
    match format {
        MediaFormat::Equirectangular | MediaFormat::Unknown => 0,
        MediaFormat::Cube => 1,
        MediaFormat::Flat => 2,
    }
}

/// std140-compatible layout (112 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BackgroundUniforms {
    /// Camera rotation (world from view)
    pub rotation: [[f32; 4]; 4],
    pub pan: [f32; 2],
    pub aspect: f32,
    pub projection_fov: f32,
    pub zoom: f32,
    pub media_aspect: f32,
    /// Distance of the projection centre behind the sphere centre
    pub camera_distance: f32,
    pub mode: u32,
    pub format: u32,
    pub _padding: [u32; 3],
}

impl Default for BackgroundUniforms {
    fn default() -> Self {
        Self {
            rotation: Mat4::IDENTITY.to_cols_array_2d(),
            pan: [0.0, 0.0],
            aspect: 1.0,
            projection_fov: std::f32::consts::FRAC_PI_2,
            zoom: 1.0,
            media_aspect: 2.0,
            camera_distance: 0.0,
            mode: ProjectionMode::Rectilinear as u32,
            format: 0,
            _padding: [0; 3],
        }
    }
}

impl BackgroundUniforms {
    /// Refresh the per-frame values from a camera snapshot
    pub fn update_from_camera(&mut self, camera: &RenderCamera) {
        self.rotation = Mat4::from_quat(camera.orientation()).to_cols_array_2d();
        self.aspect = camera.viewport().aspect();
        match camera.projection() {
            ProjectionKind::Perspective { fov } => {
                self.projection_fov = fov;
            }
            ProjectionKind::Orthographic { pan, zoom } => {
                self.pan = pan.to_array();
                self.zoom = zoom;
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Named uniforms for `CommandList::bind_program`
    pub fn to_uniform_set(&self) -> UniformSet {
        let mut set = UniformSet::new();
        set.set("rotation", UniformValue::Mat4(Mat4::from_cols_array_2d(&self.rotation)));
        set.set("pan", UniformValue::Vec2(Vec2::from_array(self.pan)));
        set.set("aspect", UniformValue::Float(self.aspect));
        set.set("projectionFov", UniformValue::Float(self.projection_fov));
        set.set("zoom", UniformValue::Float(self.zoom));
        set.set("mediaAspect", UniformValue::Float(self.media_aspect));
        set.set("cameraDistance", UniformValue::Float(self.camera_distance));
        set.set("mode", UniformValue::Int(self.mode as i32));
        set.set("format", UniformValue::Int(self.format as i32));
        set.set("tDiffuse", UniformValue::Int(0));
        set.set("tCube", UniformValue::Int(0));
        set
    }
}
