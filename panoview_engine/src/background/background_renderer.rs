/// Background renderers - draw the panoramic media into an offscreen
/// target sized to the output resolution.
///
/// Two variants share one `BackgroundSource` (media texture + target):
///
/// - `Mesh`: geometry-mapped media (sphere, inward cube or flat quad)
///   drawn with the camera matrices. Required in VR and for cube/flat
///   sources.
/// - `Shader`: fullscreen reprojection of the media, cheaper for mono
///   equirectangular playback and used for every source in a flat view.
///
/// Switching variants moves the source across, so the texture and the
/// target the pipeline samples survive the swap.

use std::sync::Arc;
use glam::{Mat4, Vec3};
use serde::Deserialize;

use crate::camera::{ProjectionKind, RenderCamera};
use crate::error::Result;
use crate::graphics_device::{
    BlendMode, ClearValue, CommandList, GraphicsDevice, Mesh, RenderTarget,
    RenderTargetDesc, ShaderProgram, Texture, TextureData, TextureDesc,
    TextureFormat, TextureKind, TextureLayerData, UniformSet, UniformValue,
};
use crate::math::Resolution;
use crate::view::{View, ViewType};
use crate::{engine_bail, engine_debug, engine_info};
use super::geometry::{self, DEFAULT_SPHERE_SEGMENTS};
use super::media::{MediaAsset, MediaFormat, MediaSurface, SurfacePixels};
use super::shaders;
use super::uniforms::{format_code, BackgroundUniforms, ProjectionMode};

/// Background variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundKind {
    Mesh,
    Shader,
}

/// Pick the background variant for a media format, VR state and view.
///
/// VR always uses the mesh. Otherwise equirectangular media is
/// reprojected by the shader, and every other source (cube, flat,
/// unknown or absent) uses the mesh unless the view is flat.
pub fn select_background_kind(
    format: Option<MediaFormat>,
    vr_enabled: bool,
    view_type: ViewType,
) -> BackgroundKind {
    if vr_enabled {
        return BackgroundKind::Mesh;
    }
    match format {
        Some(MediaFormat::Equirectangular) => BackgroundKind::Shader,
        _ if view_type == ViewType::Flat => BackgroundKind::Shader,
        _ => BackgroundKind::Mesh,
    }
}

/// Background settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// (width, height) segments of the equirectangular sphere
    pub sphere_segments: (u32, u32),
    /// Radius of the background geometry, inside the far plane
    pub radius: f32,
    pub clear_color: [f32; 4],
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            sphere_segments: DEFAULT_SPHERE_SEGMENTS,
            radius: 10.0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// State shared by both variants and carried across a swap
struct BackgroundSource {
    format: MediaFormat,
    texture: Option<Arc<dyn Texture>>,
    target: Option<Arc<dyn RenderTarget>>,
    media_aspect: f32,
    view_type: ViewType,
    camera_distance: f32,
    config: BackgroundConfig,
}

impl BackgroundSource {
    fn clear(&self) -> Option<ClearValue> {
        Some(ClearValue(self.config.clear_color))
    }

    /// Begin + end a pass on the target, leaving it cleared
    fn clear_only(&self, cmd: &mut dyn CommandList) -> Result<()> {
        cmd.begin_pass(self.target.as_ref(), self.clear())?;
        cmd.end_pass()
    }
}

pub struct MeshBackground {
    source: BackgroundSource,
    program: Arc<dyn ShaderProgram>,
    mesh: Arc<dyn Mesh>,
}

pub struct ShaderBackground {
    source: BackgroundSource,
    program: Arc<dyn ShaderProgram>,
    uniforms: BackgroundUniforms,
}

pub enum BackgroundRenderer {
    Mesh(MeshBackground),
    Shader(ShaderBackground),
}

impl BackgroundRenderer {
    /// Upload `surface` and build the requested variant.
    pub fn new(
        device: &mut dyn GraphicsDevice,
        kind: BackgroundKind,
        surface: &MediaSurface,
        format: MediaFormat,
        view: &View,
        resolution: Resolution,
        config: BackgroundConfig,
    ) -> Result<Self> {
        let texture = create_media_texture(device, surface)?;
        let target = create_target(device, resolution)?;
        let source = BackgroundSource {
            format,
            texture: Some(texture),
            target: Some(target),
            media_aspect: surface.aspect(),
            view_type: view.view_type(),
            camera_distance: view.camera_offset(),
            config,
        };
        engine_info!("panoview::Background", "Creating {:?} background for {} media", kind, format);
        Self::build(device, kind, source)
    }

    fn build(device: &mut dyn GraphicsDevice, kind: BackgroundKind, source: BackgroundSource) -> Result<Self> {
        match kind {
            BackgroundKind::Mesh => {
                let program = device.create_shader_program(&shaders::mesh_program())?;
                let mesh = device.create_mesh(select_geometry(&source))?;
                Ok(BackgroundRenderer::Mesh(MeshBackground { source, program, mesh }))
            }
            BackgroundKind::Shader => {
                let program = device.create_shader_program(&shaders::reprojection_program())?;
                let mut uniforms = BackgroundUniforms::default();
                apply_view(&mut uniforms, &source);
                Ok(BackgroundRenderer::Shader(ShaderBackground { source, program, uniforms }))
            }
        }
    }

    /// Switch to another variant, keeping texture and target.
    pub fn switch_kind(self, device: &mut dyn GraphicsDevice, kind: BackgroundKind) -> Result<Self> {
        if self.kind() == kind {
            return Ok(self);
        }
        engine_info!("panoview::Background", "Switching background {:?} -> {:?}", self.kind(), kind);
        let source = match self {
            BackgroundRenderer::Mesh(mesh) => mesh.source,
            BackgroundRenderer::Shader(shader) => shader.source,
        };
        Self::build(device, kind, source)
    }

    // ===== GETTERS =====

    pub fn kind(&self) -> BackgroundKind {
        match self {
            BackgroundRenderer::Mesh(_) => BackgroundKind::Mesh,
            BackgroundRenderer::Shader(_) => BackgroundKind::Shader,
        }
    }

    fn source(&self) -> &BackgroundSource {
        match self {
            BackgroundRenderer::Mesh(mesh) => &mesh.source,
            BackgroundRenderer::Shader(shader) => &shader.source,
        }
    }

    fn source_mut(&mut self) -> &mut BackgroundSource {
        match self {
            BackgroundRenderer::Mesh(mesh) => &mut mesh.source,
            BackgroundRenderer::Shader(shader) => &mut shader.source,
        }
    }

    pub fn format(&self) -> MediaFormat {
        self.source().format
    }

    /// Media texture, `None` once destroyed
    pub fn texture(&self) -> Option<&Arc<dyn Texture>> {
        self.source().texture.as_ref()
    }

    /// Render target, `None` once destroyed
    pub fn target(&self) -> Option<&Arc<dyn RenderTarget>> {
        self.source().target.as_ref()
    }

    /// Texture the pipeline background pass samples
    pub fn output_texture(&self) -> Option<Arc<dyn Texture>> {
        self.target().map(|target| target.color_texture())
    }

    pub fn is_destroyed(&self) -> bool {
        self.source().texture.is_none() && self.source().target.is_none()
    }

    /// Uniform block of the shader variant
    pub fn uniforms(&self) -> Option<&BackgroundUniforms> {
        match self {
            BackgroundRenderer::Shader(shader) => Some(&shader.uniforms),
            BackgroundRenderer::Mesh(_) => None,
        }
    }

    // ===== LIFECYCLE =====

    /// Recreate the render target at the output resolution.
    pub fn set_size(&mut self, device: &mut dyn GraphicsDevice, resolution: Resolution) -> Result<()> {
        if resolution.is_empty() || self.is_destroyed() {
            return Ok(());
        }
        let target = create_target(device, resolution)?;
        self.source_mut().target = Some(target);
        engine_debug!("panoview::Background", "Target resized to {}x{}", resolution.width, resolution.height);
        Ok(())
    }

    /// Draw into the target. Without a camera the target is only cleared.
    pub fn render(&mut self, cmd: &mut dyn CommandList, camera: Option<&RenderCamera>) -> Result<()> {
        let Some(camera) = camera else {
            if self.source().target.is_some() {
                self.source().clear_only(cmd)?;
            }
            return Ok(());
        };
        match self {
            BackgroundRenderer::Mesh(mesh) => mesh.render(cmd, camera),
            BackgroundRenderer::Shader(shader) => shader.render(cmd, camera),
        }
    }

    /// Push pending media updates (new video frame, quality switch).
    /// Returns whether the texture changed.
    pub fn update(&mut self, device: &mut dyn GraphicsDevice, media: &mut dyn MediaAsset) -> Result<bool> {
        let Some(texture) = self.source().texture.clone() else {
            return Ok(false);
        };

        if media.take_quality_change() {
            if let Some(surface) = media.surface() {
                let replacement = create_media_texture(device, surface)?;
                self.replace_texture(device, replacement, surface.aspect())?;
                engine_debug!("panoview::Background", "Media quality changed, texture recreated");
                return Ok(true);
            }
        }

        let Some(frame) = media.poll_frame() else {
            return Ok(false);
        };
        let info = texture.info();
        if info.width != frame.width || info.height != frame.height || info.kind != frame.texture_kind() {
            let replacement = create_media_texture(device, &frame)?;
            self.replace_texture(device, replacement, frame.aspect())?;
            return Ok(true);
        }
        match &frame.pixels {
            SurfacePixels::Image(pixels) => device.update_texture(&texture, 0, pixels)?,
            SurfacePixels::Cube(faces) => {
                for (layer, face) in faces.iter().enumerate() {
                    device.update_texture(&texture, layer as u32, face)?;
                }
            }
        }
        Ok(true)
    }

    /// Install a recreated media texture. It may switch between 2D and cube
    /// or change aspect, so the geometry (or uniforms) follow it.
    fn replace_texture(
        &mut self,
        device: &mut dyn GraphicsDevice,
        texture: Arc<dyn Texture>,
        media_aspect: f32,
    ) -> Result<()> {
        let source = self.source_mut();
        source.texture = Some(texture);
        source.media_aspect = media_aspect;
        match self {
            BackgroundRenderer::Shader(shader) => apply_view(&mut shader.uniforms, &shader.source),
            BackgroundRenderer::Mesh(mesh) => {
                mesh.mesh = device.create_mesh(select_geometry(&mesh.source))?;
            }
        }
        Ok(())
    }

    /// Re-derive view-dependent state after the active view was replaced.
    pub fn update_after_view_change(&mut self, device: &mut dyn GraphicsDevice, view: &View) -> Result<()> {
        let source = self.source_mut();
        source.view_type = view.view_type();
        source.camera_distance = view.camera_offset();
        match self {
            BackgroundRenderer::Shader(shader) => apply_view(&mut shader.uniforms, &shader.source),
            BackgroundRenderer::Mesh(mesh) => {
                mesh.mesh = device.create_mesh(select_geometry(&mesh.source))?;
            }
        }
        Ok(())
    }

    /// Release target and texture. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }
        let source = self.source_mut();
        source.texture = None;
        source.target = None;
        engine_debug!("panoview::Background", "Background destroyed");
    }
}

impl MeshBackground {
    fn render(&mut self, cmd: &mut dyn CommandList, camera: &RenderCamera) -> Result<()> {
        let (Some(texture), Some(target)) = (&self.source.texture, &self.source.target) else {
            return Ok(());
        };
        let radius = self.source.config.radius;
        let model = match (camera.projection(), self.source.format) {
            // the flat canvas keeps its screen-space size under an orthographic camera
            (ProjectionKind::Orthographic { .. }, MediaFormat::Flat) => {
                Mat4::from_scale(Vec3::new(1.0, 1.0, radius))
            }
            _ => Mat4::from_scale(Vec3::splat(radius)),
        };

        let mut uniforms = UniformSet::new();
        uniforms.set("modelViewProjection", UniformValue::Mat4(camera.view_projection_matrix() * model));
        uniforms.set("format", UniformValue::Int(format_code(self.source.format) as i32));
        uniforms.set("tDiffuse", UniformValue::Int(0));
        uniforms.set("tCube", UniformValue::Int(0));

        cmd.begin_pass(Some(target), self.source.clear())?;
        cmd.set_blend(BlendMode::Replace)?;
        cmd.bind_program(&self.program, &uniforms)?;
        cmd.bind_texture(0, texture)?;
        cmd.draw_mesh(&self.mesh)?;
        cmd.end_pass()
    }
}

impl ShaderBackground {
    fn render(&mut self, cmd: &mut dyn CommandList, camera: &RenderCamera) -> Result<()> {
        let (Some(texture), Some(target)) = (&self.source.texture, &self.source.target) else {
            return Ok(());
        };
        self.uniforms.update_from_camera(camera);

        cmd.begin_pass(Some(target), self.source.clear())?;
        cmd.set_blend(BlendMode::Replace)?;
        cmd.bind_program(&self.program, &self.uniforms.to_uniform_set())?;
        cmd.bind_texture(0, texture)?;
        cmd.draw_fullscreen()?;
        cmd.end_pass()
    }
}

fn apply_view(uniforms: &mut BackgroundUniforms, source: &BackgroundSource) {
    uniforms.mode = ProjectionMode::from(source.view_type) as u32;
    uniforms.format = format_code(source.format);
    uniforms.media_aspect = source.media_aspect;
    uniforms.camera_distance = source.camera_distance;
}

fn select_geometry(source: &BackgroundSource) -> crate::graphics_device::MeshDesc {
    let is_cube = source.texture.as_ref().is_some_and(|texture| texture.info().is_cube());
    if is_cube {
        geometry::cube()
    } else if source.format == MediaFormat::Flat {
        geometry::quad(source.media_aspect)
    } else {
        let (width, height) = source.config.sphere_segments;
        geometry::sphere(width, height)
    }
}

fn create_target(device: &mut dyn GraphicsDevice, resolution: Resolution) -> Result<Arc<dyn RenderTarget>> {
    device.create_render_target(RenderTargetDesc {
        name: "background".to_string(),
        width: resolution.width.max(1),
        height: resolution.height.max(1),
        format: TextureFormat::R8G8B8A8_UNORM,
        depth: true,
    })
}

fn create_media_texture(device: &mut dyn GraphicsDevice, surface: &MediaSurface) -> Result<Arc<dyn Texture>> {
    let layer_size = (surface.width as usize) * (surface.height as usize) * 4;
    let (kind, data) = match &surface.pixels {
        SurfacePixels::Image(pixels) => {
            if pixels.len() != layer_size {
                engine_bail!("panoview::Background", InvalidResource =>
                    "media surface holds {} bytes, expected {}", pixels.len(), layer_size);
            }
            (TextureKind::D2, TextureData::Single(pixels.clone()))
        }
        SurfacePixels::Cube(faces) => {
            if faces.len() != 6 || faces.iter().any(|face| face.len() != layer_size) {
                engine_bail!("panoview::Background", InvalidResource =>
                    "cube surface needs 6 faces of {} bytes", layer_size);
            }
            let layers = faces.iter().enumerate()
                .map(|(layer, face)| TextureLayerData { layer: layer as u32, data: face.clone() })
                .collect();
            (TextureKind::Cube, TextureData::Layers(layers))
        }
    };
    device.create_texture(TextureDesc {
        name: "background_media".to_string(),
        width: surface.width,
        height: surface.height,
        format: TextureFormat::R8G8B8A8_SRGB,
        kind,
        data: Some(data),
    })
}

#[cfg(test)]
#[path = "background_renderer_tests.rs"]
mod tests;
