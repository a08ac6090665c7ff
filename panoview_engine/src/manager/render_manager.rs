/// RenderManager - owns the graphics device and the camera / view /
/// background / pipeline lifetimes, driven by scene events and the host
/// frame callback.
///
/// Per frame the host calls `update()` then `render()`. Scene events
/// arrive through `on_scene_load_start`, `on_scene_load_complete` and
/// `on_unload_start`.

use std::sync::Arc;
use std::time::Instant;
use glam::{Vec2, Vec3};

use crate::background::{select_background_kind, BackgroundRenderer, MediaAsset};
use crate::camera::{Camera, CameraConfig};
use crate::error::Result;
use crate::graphics_device::{lock_device, ClearValue, SharedGraphicsDevice, ShaderProgram, Viewport};
use crate::math::Resolution;
use crate::render_pipeline::{EffectRegistry, RenderPipeline, RenderScene};
use crate::signal::Signal;
use crate::view::{FlatView, View, ViewType, DEFAULT_FLAT_ASPECT};
use crate::{engine_err, engine_info, engine_warn};
use super::display::DisplayDevice;
use super::scene_config::{RenderConfig, SceneConfig};

pub struct RenderManager {
    config: RenderConfig,
    device: Option<SharedGraphicsDevice>,
    display: Box<dyn DisplayDevice>,
    effects: Box<dyn EffectRegistry>,
    camera: Camera,
    pipeline: Option<RenderPipeline>,
    background: Option<BackgroundRenderer>,
    media: Option<Box<dyn MediaAsset>>,
    /// Scene being loaded or shown
    scene: Option<SceneConfig>,
    story_camera: CameraConfig,
    picking_material: Option<Arc<dyn ShaderProgram>>,
    resolution: Resolution,
    vr_presenting: bool,
    last_update: Option<Instant>,
    destroyed: bool,
    /// Fired after the active view type changed
    pub on_view_change: Signal<ViewType>,
}

impl RenderManager {
    /// Create the graphics device and the render pipeline.
    ///
    /// Any failure is reported as `InitializationFailed`, after releasing
    /// whatever was already created.
    pub fn new<F>(
        config: RenderConfig,
        create_device: F,
        display: Box<dyn DisplayDevice>,
        effects: Box<dyn EffectRegistry>,
    ) -> Result<Self>
    where
        F: FnOnce(Resolution) -> Result<SharedGraphicsDevice>,
    {
        let display_size = display.renderer_size();
        let resolution = if display_size.is_empty() { config.resolution } else { display_size };

        let device = create_device(resolution).map_err(|err| {
            engine_err!("panoview::RenderManager", InitializationFailed =>
                "graphics device creation failed: {}", err)
        })?;

        let pipeline = {
            let mut guard = lock_device(&device)?;
            RenderPipeline::new(&mut *guard, resolution, config.pipeline_config())
        };
        let pipeline = match pipeline {
            Ok(pipeline) => pipeline,
            Err(err) => {
                release_device(&device);
                return Err(engine_err!("panoview::RenderManager", InitializationFailed =>
                    "render pipeline creation failed: {}", err));
            }
        };

        let mut camera = Camera::with_clip_planes(config.near, config.far);
        camera.set_size(resolution);
        camera.update();

        engine_info!("panoview::RenderManager", "Render manager ready ({}x{})",
            resolution.width, resolution.height);

        Ok(Self {
            config,
            device: Some(device),
            vr_presenting: display.presenting_vr(),
            display,
            effects,
            camera,
            pipeline: Some(pipeline),
            background: None,
            media: None,
            scene: None,
            story_camera: CameraConfig::default(),
            picking_material: None,
            resolution,
            last_update: None,
            destroyed: false,
            on_view_change: Signal::new(),
        })
    }

    // ===== SETTINGS =====

    /// Story-level camera config, overlaid by each scene's own
    pub fn set_story_camera(&mut self, config: CameraConfig) {
        self.story_camera = config;
    }

    /// Material used by the picking compositors in projected views
    pub fn set_picking_material(&mut self, material: Arc<dyn ShaderProgram>) {
        self.picking_material = Some(material);
        let status = self.camera.view().uses_picking_buffer();
        if let Some(pipeline) = self.pipeline.as_mut() {
            pipeline.enable_picking(status, self.picking_material.clone(), None);
        }
    }

    // ===== SCENE EVENTS =====

    /// Build (or keep) the view and apply the merged camera config.
    pub fn on_scene_load_start(&mut self, scene: SceneConfig) -> Result<()> {
        let view_type = scene.view.resolve()?;
        self.set_view(view_type)?;

        let camera_config = CameraConfig::merged(&self.story_camera, &scene.camera);
        self.camera.load(&camera_config);
        self.camera.update();

        engine_info!("panoview::RenderManager", "Scene load started ({} view)", view_type.as_str());
        self.scene = Some(scene);
        Ok(())
    }

    /// Wire render scenes and effects, then the background once `media`
    /// is ready (now, or on a later `update()`).
    pub fn on_scene_load_complete(&mut self, media: Box<dyn MediaAsset>, scenes: &[RenderScene]) -> Result<()> {
        let device = self.shared_device()?;
        {
            let mut guard = lock_device(&device)?;
            if let Some(pipeline) = self.pipeline.as_mut() {
                pipeline.add_render_scenes(&mut *guard, scenes)?;
                if let Some(fx) = self.scene.as_ref().and_then(|scene| scene.fx.as_deref()) {
                    let passes = self.effects.parse_shader_passes(fx);
                    pipeline.add_global_fx(&mut *guard, &passes)?;
                }
                pipeline.enable_picking(
                    self.camera.view().uses_picking_buffer(),
                    self.picking_material.clone(),
                    None,
                );
            }
        }
        self.media = Some(media);
        self.ensure_background()
    }

    /// Tear down background, pipeline state and media. Safe at any point
    /// of a load.
    pub fn on_unload_start(&mut self) {
        if let Some(mut background) = self.background.take() {
            background.destroy();
        }
        if let Some(pipeline) = self.pipeline.as_mut() {
            pipeline.clear();
        }
        if let Some(mut media) = self.media.take() {
            media.release();
        }
        self.scene = None;
        engine_info!("panoview::RenderManager", "Scene unloaded");
    }

    // ===== VIEW =====

    /// Replace the active view. Returns false (and fires nothing) when the
    /// type is already active.
    pub fn set_view(&mut self, view_type: ViewType) -> Result<bool> {
        if self.camera.view().view_type() == view_type {
            return Ok(false);
        }
        let view = match view_type {
            ViewType::Flat => View::Flat(FlatView::with_aspect(self.media_aspect())),
            other => View::new(other),
        };
        self.camera.set_view(view);
        self.camera.update();

        if let Some(background) = self.background.take() {
            self.background = self.rebuild_background(background, view_type)?;
        }
        let picking = self.camera.view().uses_picking_buffer();
        if let Some(pipeline) = self.pipeline.as_mut() {
            pipeline.enable_picking(picking, self.picking_material.clone(), None);
        }

        engine_info!("panoview::RenderManager", "View changed to {}", view_type.as_str());
        self.on_view_change.dispatch(&view_type);
        Ok(true)
    }

    // ===== FRAME =====

    /// Advance the camera by the wall-clock time since the last update.
    pub fn update(&mut self) -> Result<()> {
        let now = Instant::now();
        let dt_ms = self.last_update
            .map(|last| now.duration_since(last).as_secs_f32() * 1000.0)
            .unwrap_or(0.0);
        self.last_update = Some(now);
        self.update_with_delta(dt_ms)
    }

    /// Frame update with an explicit time step.
    pub fn update_with_delta(&mut self, dt_ms: f32) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        if self.display.take_display_change() {
            self.on_display_change()?;
        }
        self.camera.advance(dt_ms);
        if let Some(pipeline) = self.pipeline.as_mut() {
            pipeline.advance_time(dt_ms);
        }
        self.ensure_background()?;

        if let (Some(background), Some(media), Some(device)) =
            (self.background.as_mut(), self.media.as_mut(), self.device.as_ref())
        {
            let mut guard = lock_device(device)?;
            background.update(&mut *guard, &mut **media)?;
        }
        self.camera.update();
        Ok(())
    }

    /// Record and submit one frame: clear the screen once, then per
    /// viewport, background then pipeline.
    pub fn render(&mut self) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        let device = self.shared_device()?;
        let mut guard = lock_device(&device)?;
        let mut cmd = guard.create_command_list()?;

        // eyes share the screen, so it is cleared here and never by a pass
        let full = Viewport::new(0.0, 0.0, self.resolution.width as f32, self.resolution.height as f32);
        cmd.set_viewport(full)?;
        cmd.begin_pass(None, Some(ClearValue(self.config.clear_color)))?;
        cmd.end_pass()?;

        let separation = self.eye_separation();
        for params in self.display.render_params() {
            cmd.set_viewport(params.viewport)?;
            let render_camera = self.camera.render_camera(params.viewport, params.eye, separation);
            if let Some(background) = self.background.as_mut() {
                background.render(cmd.as_mut(), Some(&render_camera))?;
            }
            if let Some(pipeline) = self.pipeline.as_mut() {
                pipeline.render(cmd.as_mut(), &render_camera)?;
            }
        }
        guard.submit(cmd)?;
        drop(guard);

        if self.display.presenting_vr() {
            self.display.submit_frame()?;
        }
        Ok(())
    }

    /// Follow a display size or presentation change: resize every buffer
    /// and pick the background variant for the new VR state.
    pub fn on_display_change(&mut self) -> Result<()> {
        let size = self.display.renderer_size();
        if !size.is_empty() && size != self.resolution {
            self.resolution = size;
            self.camera.set_size(size);
            if let Some(device) = self.device.clone() {
                let mut guard = lock_device(&device)?;
                guard.resize(size.width, size.height);
                if let Some(pipeline) = self.pipeline.as_mut() {
                    pipeline.set_size(&mut *guard, size)?;
                }
                if let Some(background) = self.background.as_mut() {
                    background.set_size(&mut *guard, size)?;
                    if let (Some(pipeline), Some(texture)) = (self.pipeline.as_mut(), background.output_texture()) {
                        pipeline.set_background_texture(texture);
                    }
                }
            }
            engine_info!("panoview::RenderManager", "Display resized to {}x{}", size.width, size.height);
        }

        let presenting = self.display.presenting_vr();
        if presenting != self.vr_presenting {
            self.vr_presenting = presenting;
            let view_type = self.camera.view().view_type();
            if let Some(background) = self.background.take() {
                self.background = self.rebuild_background(background, view_type)?;
            }
            engine_info!("panoview::RenderManager", "VR presentation {}",
                if presenting { "started" } else { "stopped" });
        }
        Ok(())
    }

    // ===== PICKING / MAPPING =====

    /// Unit world direction under a screen point, `None` outside the view
    pub fn screen_to_world(&self, point: Vec2) -> Option<Vec3> {
        self.camera.screen_to_world(point)
    }

    /// Screen point of a world direction, `None` when not visible
    pub fn world_to_screen(&self, direction: Vec3) -> Option<Vec2> {
        self.camera.world_to_screen(direction)
    }

    // ===== TEARDOWN =====

    /// Release everything. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.on_unload_start();
        self.pipeline = None;
        if let Some(device) = self.device.take() {
            release_device(&device);
        }
        self.on_view_change.clear();
        self.destroyed = true;
        engine_info!("panoview::RenderManager", "Render manager destroyed");
    }

    // ===== GETTERS =====

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn view_type(&self) -> ViewType {
        self.camera.view().view_type()
    }

    pub fn pipeline(&self) -> Option<&RenderPipeline> {
        self.pipeline.as_ref()
    }

    pub fn background(&self) -> Option<&BackgroundRenderer> {
        self.background.as_ref()
    }

    pub fn scene(&self) -> Option<&SceneConfig> {
        self.scene.as_ref()
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn is_presenting_vr(&self) -> bool {
        self.vr_presenting
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // ===== INTERNALS =====

    fn shared_device(&self) -> Result<SharedGraphicsDevice> {
        self.device.clone().ok_or_else(|| {
            engine_err!("panoview::RenderManager", InvalidResource => "render manager was destroyed")
        })
    }

    fn eye_separation(&self) -> f32 {
        if !self.vr_presenting {
            return 0.0;
        }
        let separation = self.display.eye_separation();
        if separation > 0.0 { separation } else { self.config.eye_separation }
    }

    fn media_aspect(&self) -> f32 {
        self.media.as_ref()
            .and_then(|media| media.surface())
            .map(|surface| surface.aspect())
            .unwrap_or(DEFAULT_FLAT_ASPECT)
    }

    /// Build the background once the media is ready, and hand its output
    /// to the pipeline with the media effect chain.
    fn ensure_background(&mut self) -> Result<()> {
        if self.background.is_some() {
            return Ok(());
        }
        let Some(media) = self.media.as_ref() else {
            return Ok(());
        };
        if !media.is_ready() {
            return Ok(());
        }
        let Some(surface) = media.surface() else {
            return Ok(());
        };

        let format = self.scene.as_ref()
            .and_then(|scene| scene.media.source.format)
            .unwrap_or_else(|| media.format());
        let view_type = self.camera.view().view_type();
        if view_type == ViewType::Flat {
            // the flat canvas follows the media proportions
            self.camera.set_view(View::Flat(FlatView::with_aspect(surface.aspect())));
        }
        let kind = select_background_kind(Some(format), self.vr_presenting, view_type);

        let device = self.shared_device()?;
        let mut guard = lock_device(&device)?;
        let background = BackgroundRenderer::new(
            &mut *guard,
            kind,
            surface,
            format,
            self.camera.view(),
            self.resolution,
            self.config.background_config(),
        )?;

        if let (Some(pipeline), Some(texture)) = (self.pipeline.as_mut(), background.output_texture()) {
            let fx = match self.scene.as_ref().and_then(|scene| scene.media.fx.as_deref()) {
                Some(fx) => self.effects.parse_shader_passes(fx),
                None => Vec::new(),
            };
            pipeline.add_background(&mut *guard, texture, &fx, 1.0)?;
        }
        self.background = Some(background);
        Ok(())
    }

    /// Switch the background variant for the current VR state and view,
    /// then re-derive its view state. On failure the background is dropped
    /// from the pipeline as well.
    fn rebuild_background(
        &mut self,
        background: BackgroundRenderer,
        view_type: ViewType,
    ) -> Result<Option<BackgroundRenderer>> {
        let device = self.shared_device()?;
        let mut guard = lock_device(&device)?;
        let kind = select_background_kind(Some(background.format()), self.vr_presenting, view_type);

        let rebuilt = background
            .switch_kind(&mut *guard, kind)
            .and_then(|mut background| {
                background.update_after_view_change(&mut *guard, self.camera.view())?;
                Ok(background)
            });
        match rebuilt {
            Ok(background) => Ok(Some(background)),
            Err(err) => {
                if let Some(pipeline) = self.pipeline.as_mut() {
                    pipeline.remove_background();
                }
                Err(err)
            }
        }
    }
}

impl Drop for RenderManager {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Wait for the device before its last handle goes away
fn release_device(device: &SharedGraphicsDevice) {
    match lock_device(device) {
        Ok(mut guard) => {
            if let Err(err) = guard.wait_idle() {
                engine_warn!("panoview::RenderManager", "wait_idle failed during teardown: {}", err);
            }
        }
        Err(_) => {
            engine_warn!("panoview::RenderManager", "graphics device lock poisoned during teardown");
        }
    }
}

#[cfg(test)]
#[path = "render_manager_tests.rs"]
mod tests;
