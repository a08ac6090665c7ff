/// RenderPipeline - main compositor plus scene / picking sub-compositors.
///
/// Main compositor pass order is always Background → Default → Global.
/// After every structural change `update_render_pipeline()` restores the
/// ordering, the clear flags and the single render-to-screen pass, so
/// `render()` never observes an intermediate state.

use std::sync::Arc;
use slotmap::SlotMap;

use crate::camera::RenderCamera;
use crate::error::Result;
use crate::graphics_device::{
    CommandList, GraphicsDevice, RenderTarget, ShaderProgram, Texture,
};
use crate::math::Resolution;
use crate::{engine_debug, engine_info};
use super::compositor::{Compositor, CompositorRole};
use super::effects::EffectDescriptor;
use super::pass::{CompositorKey, FrameState, Pass, PassKind, PassPosition};
use super::render_scene::RenderScene;
use super::shaders;

/// Pipeline settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub clear_color: [f32; 4],
    /// Resolution factor of the picking buffers
    pub picking_scale: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            picking_scale: 1.0,
        }
    }
}

struct SceneEntry {
    name: String,
    scene: CompositorKey,
    picking: CompositorKey,
}

pub struct RenderPipeline {
    main: Compositor,
    sub_compositors: SlotMap<CompositorKey, Compositor>,
    /// Insertion order of the sub-compositors
    order: Vec<CompositorKey>,
    scenes: Vec<SceneEntry>,
    texture_program: Arc<dyn ShaderProgram>,
    addition_program: Arc<dyn ShaderProgram>,
    picking_material: Option<Arc<dyn ShaderProgram>>,
    picking_enabled: bool,
    shader_passes_enabled: bool,
    resolution: Resolution,
    config: PipelineConfig,
    /// Seconds advanced by `advance_time()`, shared by every eye of a frame
    elapsed: f32,
}

impl RenderPipeline {
    pub fn new(device: &mut dyn GraphicsDevice, resolution: Resolution, config: PipelineConfig) -> Result<Self> {
        let texture_program = device.create_shader_program(&shaders::texture_program())?;
        let addition_program = device.create_shader_program(&shaders::addition_program())?;
        let main = Compositor::new(device, "main", CompositorRole::Main, resolution, 1.0, None)?;

        Ok(Self {
            main,
            sub_compositors: SlotMap::with_key(),
            order: Vec::new(),
            scenes: Vec::new(),
            texture_program,
            addition_program,
            picking_material: None,
            picking_enabled: false,
            shader_passes_enabled: true,
            resolution,
            config,
            elapsed: 0.0,
        })
    }

    // ===== STRUCTURE =====

    /// Insert the background texture pass, preceded in execution by
    /// nothing and followed by the `fx` chain in its logical order.
    pub fn add_background(
        &mut self,
        device: &mut dyn GraphicsDevice,
        texture: Arc<dyn Texture>,
        fx: &[EffectDescriptor],
        opacity: f32,
    ) -> Result<()> {
        let passes = self.compile_effects(device, fx, PassPosition::Background)?;
        // head insertion reverses, so insert the chain back to front
        for pass in passes.into_iter().rev() {
            self.main.insert_pass(0, pass);
        }
        self.main.insert_pass(0, Pass::texture("background", texture, opacity.clamp(0.0, 1.0)));
        engine_info!("panoview::RenderPipeline", "Background added ({} effect passes)", fx.len());
        self.update_render_pipeline();
        Ok(())
    }

    /// Swap the texture drawn by the background pass. Returns false when
    /// there is no background pass.
    pub fn set_background_texture(&mut self, texture: Arc<dyn Texture>) -> bool {
        for pass in self.main.passes_mut().iter_mut() {
            if let PassKind::TextureDraw { texture: current, .. } = &mut pass.kind {
                *current = texture;
                return true;
            }
        }
        false
    }

    /// Remove the background texture pass and its effect chain.
    pub fn remove_background(&mut self) {
        self.main.passes_mut().retain(|pass| pass.position != PassPosition::Background);
        self.update_render_pipeline();
    }

    /// Add a scene compositor (blended into main) and a picking compositor
    /// (rendering to its own target) per scene.
    pub fn add_render_scenes(&mut self, device: &mut dyn GraphicsDevice, scenes: &[RenderScene]) -> Result<()> {
        // build everything first so a failure leaves the pipeline untouched
        let mut built = Vec::with_capacity(scenes.len());
        for scene in scenes {
            let mut scene_compositor = Compositor::new(
                device,
                &format!("{}_scene", scene.name),
                CompositorRole::Scene,
                self.resolution,
                1.0,
                scene.target.clone(),
            )?;
            scene_compositor.add_pass(Pass::scene(&scene.name, scene.drawable.clone()));

            let mut picking_compositor = Compositor::new(
                device,
                &format!("{}_picking", scene.name),
                CompositorRole::Picking,
                self.resolution,
                self.config.picking_scale,
                scene.picking_target.clone(),
            )?;
            let mut picking_pass = Pass::scene(&format!("{}_picking", scene.name), scene.drawable.clone());
            if let PassKind::Scene { material, .. } = &mut picking_pass.kind {
                *material = self.picking_material.clone();
            }
            picking_compositor.add_pass(picking_pass);
            picking_compositor.set_enabled(self.picking_enabled);

            built.push((scene.name.clone(), scene_compositor, picking_compositor));
        }

        for (name, scene_compositor, picking_compositor) in built {
            let scene_key = self.sub_compositors.insert(scene_compositor);
            let picking_key = self.sub_compositors.insert(picking_compositor);
            self.order.push(scene_key);
            self.order.push(picking_key);
            self.main.add_pass(Pass::addition(&format!("{}_addition", name), scene_key));
            engine_info!("panoview::RenderPipeline", "Render scene '{}' added", name);
            self.scenes.push(SceneEntry { name, scene: scene_key, picking: picking_key });
        }
        self.update_render_pipeline();
        Ok(())
    }

    /// Append global effect passes at the tail of the main compositor.
    pub fn add_global_fx(&mut self, device: &mut dyn GraphicsDevice, fx: &[EffectDescriptor]) -> Result<()> {
        let passes = self.compile_effects(device, fx, PassPosition::Global)?;
        for pass in passes {
            self.main.add_pass(pass);
        }
        self.update_render_pipeline();
        Ok(())
    }

    /// Drop every pass, sub-compositor and picking setting.
    pub fn clear(&mut self) {
        self.main.passes_mut().clear();
        self.sub_compositors.clear();
        self.order.clear();
        self.scenes.clear();
        self.picking_material = None;
        self.picking_enabled = false;
        engine_debug!("panoview::RenderPipeline", "Pipeline cleared");
    }

    // ===== RUNTIME SWITCHES =====

    /// Toggle the picking compositors, optionally replacing their material
    /// and output target.
    pub fn enable_picking(
        &mut self,
        status: bool,
        material: Option<Arc<dyn ShaderProgram>>,
        target: Option<Arc<dyn RenderTarget>>,
    ) {
        self.picking_enabled = status;
        if material.is_some() {
            self.picking_material = material;
        }
        for entry in &self.scenes {
            if let Some(compositor) = self.sub_compositors.get_mut(entry.picking) {
                compositor.set_enabled(status);
                if let Some(target) = &target {
                    compositor.set_target(target.clone());
                }
                for pass in compositor.passes_mut().iter_mut() {
                    if let PassKind::Scene { material, .. } = &mut pass.kind {
                        material.clone_from(&self.picking_material);
                    }
                }
            }
        }
        self.update_render_pipeline();
    }

    /// Enable or disable every shader (effect) pass at once.
    pub fn set_shader_passes_enabled(&mut self, enabled: bool) {
        self.shader_passes_enabled = enabled;
        let subs = self.sub_compositors.values_mut();
        for compositor in std::iter::once(&mut self.main).chain(subs) {
            for pass in compositor.passes_mut().iter_mut().filter(|p| p.is_shader()) {
                pass.enabled = enabled;
            }
        }
        self.update_render_pipeline();
    }

    // ===== FRAME =====

    /// Advance the effect clock by one frame delta (milliseconds).
    pub fn advance_time(&mut self, dt_ms: f32) {
        self.elapsed += dt_ms.max(0.0) / 1000.0;
    }

    /// Run enabled sub-compositors, then the main compositor. Only reads
    /// the effect clock, so both eyes of a stereo frame see the same time.
    pub fn render(&mut self, cmd: &mut dyn CommandList, camera: &RenderCamera) -> Result<()> {
        let frame = FrameState {
            camera,
            time: self.elapsed,
            clear_color: self.config.clear_color,
            texture_program: &self.texture_program,
            addition_program: &self.addition_program,
        };

        for key in &self.order {
            if let Some(compositor) = self.sub_compositors.get_mut(*key) {
                if compositor.is_enabled() {
                    compositor.render(cmd, &frame, |_| None)?;
                }
            }
        }

        let subs = &self.sub_compositors;
        self.main.render(cmd, &frame, |kind| match kind {
            PassKind::Addition { source } => subs
                .get(*source)
                .filter(|compositor| compositor.is_enabled())
                .and_then(|compositor| compositor.output_texture()),
            _ => None,
        })
    }

    /// Resize every compositor and push the texel-size uniform.
    pub fn set_size(&mut self, device: &mut dyn GraphicsDevice, resolution: Resolution) -> Result<()> {
        if resolution.is_empty() {
            return Ok(());
        }
        self.resolution = resolution;
        self.main.set_size(device, resolution)?;
        for compositor in self.sub_compositors.values_mut() {
            compositor.set_size(device, resolution)?;
        }
        engine_debug!("panoview::RenderPipeline", "Resized to {}x{}", resolution.width, resolution.height);
        Ok(())
    }

    // ===== GETTERS =====

    pub fn main(&self) -> &Compositor {
        &self.main
    }

    pub fn sub_compositor(&self, key: CompositorKey) -> Option<&Compositor> {
        self.sub_compositors.get(key)
    }

    /// Sub-compositors in insertion (and execution) order
    pub fn sub_compositor_keys(&self) -> &[CompositorKey] {
        &self.order
    }

    /// (scene compositor, picking compositor) of a render scene
    pub fn scene_compositors(&self, name: &str) -> Option<(CompositorKey, CompositorKey)> {
        self.scenes.iter()
            .find(|entry| entry.name == name)
            .map(|entry| (entry.scene, entry.picking))
    }

    /// Picking buffer of a render scene, for hit testing
    pub fn picking_target(&self, name: &str) -> Option<&Arc<dyn RenderTarget>> {
        let (_, picking) = self.scene_compositors(name)?;
        self.sub_compositors.get(picking).map(|compositor| compositor.target())
    }

    pub fn is_picking_enabled(&self) -> bool {
        self.picking_enabled
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Seconds accumulated by `advance_time()`
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed
    }

    // ===== INTERNALS =====

    fn compile_effects(
        &self,
        device: &mut dyn GraphicsDevice,
        fx: &[EffectDescriptor],
        position: PassPosition,
    ) -> Result<Vec<Pass>> {
        let texel = self.resolution.texel_size();
        let mut passes = Vec::with_capacity(fx.len());
        for descriptor in fx {
            let program = device.create_shader_program(&descriptor.program)?;
            let mut pass = Pass::shader(&descriptor.program.name, program, descriptor.uniforms.clone(), position);
            pass.enabled = self.shader_passes_enabled;
            pass.set_resolution(texel);
            passes.push(pass);
        }
        Ok(passes)
    }

    /// Restore ordering, clear flags and the render-to-screen pass.
    ///
    /// Scene compositors sharing a target draw into one buffer, so only the
    /// first of them keeps its addition pass in main.
    pub(crate) fn update_render_pipeline(&mut self) {
        let mut merged = Vec::new();
        for (index, key) in self.order.iter().enumerate() {
            let shared = match self.sub_compositors.get(*key) {
                Some(compositor) => self.order[..index].iter().any(|earlier| {
                    self.sub_compositors
                        .get(*earlier)
                        .is_some_and(|other| other.shares_target_with(compositor))
                }),
                None => false,
            };
            if let Some(compositor) = self.sub_compositors.get_mut(*key) {
                if shared && compositor.role() == CompositorRole::Scene {
                    merged.push(*key);
                }
                for (pass_index, pass) in compositor.passes_mut().iter_mut().enumerate() {
                    pass.clear = !shared && pass_index == 0;
                    pass.render_to_screen = false;
                }
            }
        }

        let passes = self.main.passes_mut();
        passes.sort_by_key(|pass| pass.position);
        for pass in passes.iter_mut() {
            if let PassKind::Addition { source } = &pass.kind {
                pass.enabled = !merged.contains(source);
            }
        }

        let first = passes.iter().position(|pass| pass.enabled);
        let last = passes.iter().rposition(|pass| pass.enabled);
        for (index, pass) in passes.iter_mut().enumerate() {
            pass.clear = Some(index) == first;
            pass.render_to_screen = Some(index) == last;
        }

        engine_debug!("panoview::RenderPipeline",
            "Pipeline updated: {} main passes, {} sub-compositors",
            self.main.passes().len(), self.order.len());
    }
}

#[cfg(test)]
#[path = "render_pipeline_tests.rs"]
mod tests;
