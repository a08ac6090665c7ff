/// Camera - yaw/pitch/roll/fov state under view-dependent bounds.
///
/// The camera owns the active [`View`] and delegates its angular limits
/// and screen/world mapping to it. Every setter wraps, then clamps to the
/// intersection of the camera config bounds and the view limits; yaw and
/// pitch are additionally narrowed by half the current fov.
///
/// Setters only record what changed. `update()` derives the pose and
/// both projections once per frame, fires the change signals and clears
/// the changelog.

use std::f32::consts::FRAC_PI_2;
use glam::{Mat4, Quat, Vec2, Vec3};

use crate::graphics_device::Viewport;
use crate::math::{AngleUnit, CameraPose, Resolution, clamp, to_radians, wrap_angle};
use crate::signal::Signal;
use crate::view::{View, ViewContext};
use super::animation::{AnimationPlayer, AnimationTrack, CameraAngles, Easing, Keyframe};
use super::changelog::ChangeFlags;
use super::config::{CameraBounds, CameraConfig, DEFAULT_FOV_DEGREES};
use super::projection::{OrthographicProjection, PerspectiveProjection, DEFAULT_FAR, DEFAULT_NEAR};
use super::render_camera::{Eye, ProjectionKind, RenderCamera};

/// Radius of the media sphere, in world units
pub const CAMERA_RADIUS: f32 = 1.0;

const PITCH_POLE_EPSILON: f32 = 1e-5;

/// Bounded camera value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAxis {
    Yaw,
    Pitch,
    Roll,
    Fov,
}

impl CameraAxis {
    fn flag(self) -> ChangeFlags {
        match self {
            CameraAxis::Yaw => ChangeFlags::YAW,
            CameraAxis::Pitch => ChangeFlags::PITCH,
            CameraAxis::Roll => ChangeFlags::ROLL,
            CameraAxis::Fov => ChangeFlags::FOV,
        }
    }
}

/// `Camera::look_at` request. Unset angles keep their current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAt {
    pub yaw: Option<f32>,
    pub pitch: Option<f32>,
    pub roll: Option<f32>,
    pub fov: Option<f32>,
    pub unit: AngleUnit,
    /// `None` or 0 applies the target immediately
    pub duration_ms: Option<f32>,
    /// Force roll back to 0
    pub cancel_roll: bool,
    pub easing: Easing,
}

impl LookAt {
    pub fn new(unit: AngleUnit) -> Self {
        Self {
            yaw: None,
            pitch: None,
            roll: None,
            fov: None,
            unit,
            duration_ms: None,
            cancel_roll: false,
            easing: Easing::default(),
        }
    }

    pub fn yaw(mut self, yaw: f32) -> Self {
        self.yaw = Some(yaw);
        self
    }

    pub fn pitch(mut self, pitch: f32) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn roll(mut self, roll: f32) -> Self {
        self.roll = Some(roll);
        self
    }

    pub fn fov(mut self, fov: f32) -> Self {
        self.fov = Some(fov);
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn cancel_roll(mut self) -> Self {
        self.cancel_roll = true;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

#[derive(Debug)]
pub struct Camera {
    view: View,
    bounds: CameraBounds,

    yaw: f32,
    pitch: f32,
    roll: f32,
    fov: f32,
    parallax: f32,
    keep: bool,
    initialized: bool,

    pose: CameraPose,
    resolution: Resolution,
    perspective: PerspectiveProjection,
    orthographic: OrthographicProjection,
    changelog: ChangeFlags,
    animation: AnimationPlayer,

    /// Fired from `update()` when yaw, pitch or roll changed
    pub on_orientation_change: Signal<CameraPose>,
    /// Fired from `update()` when the fov changed, after orientation
    pub on_fov_change: Signal<f32>,
    /// Fired from `update()` last, when anything changed
    pub on_change: Signal<ChangeFlags>,
    pub on_animation_complete: Signal<()>,
}

impl Camera {
    pub fn new() -> Self {
        Self::with_clip_planes(DEFAULT_NEAR, DEFAULT_FAR)
    }

    pub fn with_clip_planes(near: f32, far: f32) -> Self {
        let mut camera = Self {
            view: View::default(),
            bounds: CameraBounds::UNBOUNDED,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            fov: to_radians(DEFAULT_FOV_DEGREES),
            parallax: 0.0,
            keep: false,
            initialized: false,
            pose: CameraPose::IDENTITY,
            resolution: Resolution::default(),
            perspective: PerspectiveProjection::new(near, far),
            orthographic: OrthographicProjection::new(near, far),
            changelog: ChangeFlags::empty(),
            animation: AnimationPlayer::new(),
            on_orientation_change: Signal::new(),
            on_fov_change: Signal::new(),
            on_change: Signal::new(),
            on_animation_complete: Signal::new(),
        };
        camera.update_projections();
        camera
    }

    // ===== CONFIGURATION =====

    /// Apply a (merged story + scene) camera config.
    ///
    /// With `keep` set on an already initialized camera the current angles
    /// survive; they are only re-validated against the new bounds. Parallax
    /// and keep are always taken from `config`.
    pub fn load(&mut self, config: &CameraConfig) {
        self.animation.stop();
        self.bounds = CameraBounds::from_config(config);
        self.parallax = config.parallax_factor();
        self.keep = config.keep_state();

        if self.keep && self.initialized {
            self.revalidate();
        } else {
            let degrees = |value: Option<f32>, fallback: f32| {
                to_radians(value.filter(|v| v.is_finite()).unwrap_or(fallback))
            };
            self.apply_angles(CameraAngles {
                yaw: degrees(config.yaw.default, 0.0),
                pitch: degrees(config.pitch.default, 0.0),
                roll: degrees(config.roll.default, 0.0),
                fov: degrees(config.fov.default, DEFAULT_FOV_DEGREES),
            });
            self.initialized = true;
        }
        self.update_projections();
    }

    /// Replace the active view and re-validate every angle against it.
    pub fn set_view(&mut self, view: View) {
        self.view = view;
        self.revalidate();
        self.update_projections();
    }

    pub fn set_size(&mut self, resolution: Resolution) {
        self.resolution = resolution;
        self.update_projections();
    }

    pub fn set_parallax(&mut self, parallax: f32) {
        if parallax.is_finite() {
            self.parallax = parallax.clamp(0.0, 1.0);
        }
    }

    // ===== GETTERS =====

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// An angle converted to `unit`
    pub fn angle(&self, axis: CameraAxis, unit: AngleUnit) -> f32 {
        let value = match axis {
            CameraAxis::Yaw => self.yaw,
            CameraAxis::Pitch => self.pitch,
            CameraAxis::Roll => self.roll,
            CameraAxis::Fov => self.fov,
        };
        unit.from_radians(value)
    }

    pub fn angles(&self) -> CameraAngles {
        CameraAngles { yaw: self.yaw, pitch: self.pitch, roll: self.roll, fov: self.fov }
    }

    pub fn parallax(&self) -> f32 {
        self.parallax
    }

    pub fn keep(&self) -> bool {
        self.keep
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn changelog(&self) -> ChangeFlags {
        self.changelog
    }

    /// Pose as of the last `update()`
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn perspective(&self) -> &PerspectiveProjection {
        &self.perspective
    }

    pub fn orthographic(&self) -> &OrthographicProjection {
        &self.orthographic
    }

    /// Flat-view zoom: `min(view fov max, camera fov max) / fov`
    pub fn zoom(&self) -> f32 {
        let fov_max = self.view.limits().fov_max.min(self.bounds.fov_max);
        if self.fov > 0.0 && fov_max.is_finite() {
            fov_max / self.fov
        } else {
            1.0
        }
    }

    /// Effective (min, max) for `axis` at the current fov, in radians.
    ///
    /// `relative = false` skips the half-fov narrowing of yaw and pitch.
    pub fn effective_bounds(&self, axis: CameraAxis, relative: bool) -> (f32, f32) {
        self.bounds_for(axis, self.fov, relative)
    }

    // ===== SETTERS =====

    /// Returns whether the stored value changed. Non-finite input is ignored.
    pub fn set_yaw(&mut self, value: f32, unit: AngleUnit) -> bool {
        self.set_axis(CameraAxis::Yaw, value, unit)
    }

    pub fn set_pitch(&mut self, value: f32, unit: AngleUnit) -> bool {
        self.set_axis(CameraAxis::Pitch, value, unit)
    }

    pub fn set_roll(&mut self, value: f32, unit: AngleUnit) -> bool {
        self.set_axis(CameraAxis::Roll, value, unit)
    }

    /// Sets the fov, then re-validates yaw and pitch against the new
    /// fov-dependent bounds.
    pub fn set_fov(&mut self, value: f32, unit: AngleUnit) -> bool {
        self.set_axis(CameraAxis::Fov, value, unit)
    }

    /// Set the orientation from a quaternion (world from view).
    pub fn set_quaternion(&mut self, quaternion: Quat) {
        self.apply_pose(CameraPose::from_quaternion(quaternion));
    }

    /// Set the orientation from a model-view matrix.
    pub fn set_model_view(&mut self, matrix: &Mat4) {
        self.apply_pose(CameraPose::from_view_matrix(matrix));
    }

    // ===== ANIMATION =====

    /// Point the camera, immediately or through an animation.
    ///
    /// Animated targets are clamped up front with the fov the animation
    /// will reach, not the current one.
    pub fn look_at(&mut self, target: LookAt) {
        let radians = |value: Option<f32>| {
            value.filter(|v| v.is_finite()).map(|v| target.unit.to_radians(v))
        };
        let yaw = radians(target.yaw);
        let pitch = radians(target.pitch);
        let roll = if target.cancel_roll { Some(0.0) } else { radians(target.roll) };
        let fov = radians(target.fov);

        self.animation.stop();

        match target.duration_ms {
            Some(duration) if duration.is_finite() && duration > 0.0 => {
                let target_fov = fov.map(|f| self.clamp_value(CameraAxis::Fov, f, self.fov))
                    .unwrap_or(self.fov);
                let keyframe = Keyframe {
                    yaw: yaw.map(|v| self.clamp_value(CameraAxis::Yaw, v, target_fov)),
                    pitch: pitch.map(|v| self.clamp_value(CameraAxis::Pitch, v, target_fov)),
                    roll: roll.map(|v| self.clamp_value(CameraAxis::Roll, v, target_fov)),
                    fov: fov.map(|_| target_fov),
                    duration_ms: duration,
                    easing: target.easing,
                };
                self.play(AnimationTrack::single(keyframe));
            }
            _ => {
                let current = self.angles();
                self.apply_angles(CameraAngles {
                    yaw: yaw.unwrap_or(current.yaw),
                    pitch: pitch.unwrap_or(current.pitch),
                    roll: roll.unwrap_or(current.roll),
                    fov: fov.unwrap_or(current.fov),
                });
            }
        }
    }

    /// Play an arbitrary track from the current angles.
    pub fn play(&mut self, track: AnimationTrack) {
        let from = self.angles();
        self.animation.play(track, from);
    }

    /// Advance the running animation by `dt_ms` and apply its angles.
    pub fn advance(&mut self, dt_ms: f32) {
        let Some(step) = self.animation.advance(dt_ms) else {
            return;
        };
        self.apply_angles(step.angles);
        if step.finished {
            self.on_animation_complete.dispatch(&());
        }
    }

    pub fn stop(&mut self) {
        self.animation.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.animation.is_playing()
    }

    // ===== FRAME =====

    /// Derive pose and projections, fire change signals, clear the changelog.
    pub fn update(&mut self) {
        self.update_projections();
        self.update_complete();
    }

    /// Mapping state for the active view
    pub fn view_context(&self) -> ViewContext {
        ViewContext {
            orientation: CameraPose::from_euler(self.yaw, self.pitch, self.roll).quaternion(),
            fov: self.fov,
            pan: Vec2::new(self.yaw, self.pitch),
            zoom: self.zoom(),
            resolution: self.resolution,
        }
    }

    pub fn screen_to_world(&self, point: Vec2) -> Option<Vec3> {
        self.view.screen_to_world(&self.view_context(), point)
    }

    pub fn world_to_screen(&self, direction: Vec3) -> Option<Vec2> {
        self.view.world_to_screen(&self.view_context(), direction, self.parallax * CAMERA_RADIUS)
    }

    /// Snapshot for one viewport. Eyes are offset by ±separation/2 along
    /// the camera right axis.
    pub fn render_camera(&self, viewport: Viewport, eye: Eye, eye_separation: f32) -> RenderCamera {
        let aspect = viewport.aspect();
        match self.view {
            View::Flat(_) => {
                let ortho = &self.orthographic;
                RenderCamera::new(
                    ortho.view_matrix(),
                    ortho.matrix_with_aspect(aspect),
                    ProjectionKind::Orthographic { pan: ortho.pan, zoom: ortho.zoom },
                    viewport,
                )
                .with_pose(ortho.pan.extend(0.0), Quat::IDENTITY)
                .with_eye(eye)
            }
            View::Rectilinear(_) | View::Fisheye(_) => {
                let shift = eye.sign() * eye_separation * 0.5;
                let view = Mat4::from_translation(Vec3::new(-shift, 0.0, 0.0)) * self.perspective.view_matrix;
                let position = self.perspective.position + self.pose.right() * shift;
                RenderCamera::new(
                    view,
                    self.perspective.matrix_with_aspect(aspect),
                    ProjectionKind::Perspective { fov: self.perspective.fov },
                    viewport,
                )
                .with_pose(position, self.pose.quaternion())
                .with_eye(eye)
            }
        }
    }

    // ===== INTERNALS =====

    fn set_axis(&mut self, axis: CameraAxis, value: f32, unit: AngleUnit) -> bool {
        if !value.is_finite() {
            return false;
        }
        let changed = self.write(axis, unit.to_radians(value));
        self.changelog.set(axis.flag(), changed);
        changed
    }

    /// Apply several angles in fov → yaw → pitch → roll order, accumulating
    /// changes into the changelog.
    fn apply_angles(&mut self, angles: CameraAngles) {
        for (axis, value) in [
            (CameraAxis::Fov, angles.fov),
            (CameraAxis::Yaw, angles.yaw),
            (CameraAxis::Pitch, angles.pitch),
            (CameraAxis::Roll, angles.roll),
        ] {
            if value.is_finite() && self.write(axis, value) {
                self.changelog.insert(axis.flag());
            }
        }
    }

    fn apply_pose(&mut self, pose: CameraPose) {
        let (yaw, pitch, roll) = pose.euler();
        self.apply_angles(CameraAngles { yaw, pitch, roll, fov: self.fov });
        self.update();
    }

    fn revalidate(&mut self) {
        let current = self.angles();
        self.apply_angles(current);
    }

    /// Store a clamped value. Returns whether it changed.
    fn write(&mut self, axis: CameraAxis, value: f32) -> bool {
        match axis {
            CameraAxis::Fov => {
                let clamped = self.clamp_value(CameraAxis::Fov, value, self.fov);
                let changed = clamped != self.fov;
                self.fov = clamped;
                if changed {
                    for axis in [CameraAxis::Yaw, CameraAxis::Pitch] {
                        let current = if axis == CameraAxis::Yaw { self.yaw } else { self.pitch };
                        if self.write(axis, current) {
                            self.changelog.insert(axis.flag());
                        }
                    }
                }
                changed
            }
            CameraAxis::Yaw => {
                let clamped = self.clamp_value(axis, value, self.fov);
                let changed = clamped != self.yaw;
                self.yaw = clamped;
                changed
            }
            CameraAxis::Pitch => {
                let mut clamped = self.clamp_value(axis, value, self.fov);
                // Coming back from beyond a pole (flat pan) onto a spherical
                // limit: restart from the horizon.
                if self.pitch.abs() > FRAC_PI_2
                    && clamped != wrap_angle(value)
                    && clamped.abs() <= FRAC_PI_2 + PITCH_POLE_EPSILON
                {
                    let (min, max) = self.bounds_for(axis, self.fov, true);
                    clamped = clamp(0.0, min, max);
                }
                let changed = clamped != self.pitch;
                self.pitch = clamped;
                changed
            }
            CameraAxis::Roll => {
                let clamped = self.clamp_value(axis, value, self.fov);
                let changed = clamped != self.roll;
                self.roll = clamped;
                changed
            }
        }
    }

    /// Wrap (angles only) then clamp `value` for `axis` as if the fov were `fov`.
    fn clamp_value(&self, axis: CameraAxis, value: f32, fov: f32) -> f32 {
        let (min, max) = self.bounds_for(axis, fov, true);
        match axis {
            CameraAxis::Fov => clamp(value, min, max),
            _ => clamp(wrap_angle(value), min, max),
        }
    }

    fn bounds_for(&self, axis: CameraAxis, fov: f32, relative: bool) -> (f32, f32) {
        let view = self.view.limits();
        let camera = &self.bounds;
        let half = if relative { fov * 0.5 } else { 0.0 };
        match axis {
            CameraAxis::Yaw => intersect_bounds(
                (camera.yaw_min, camera.yaw_max),
                (view.yaw_min, view.yaw_max),
                half,
            ),
            CameraAxis::Pitch => intersect_bounds(
                (camera.pitch_min, camera.pitch_max),
                (view.pitch_min, view.pitch_max),
                half,
            ),
            CameraAxis::Roll => intersect_bounds(
                (camera.roll_min, camera.roll_max),
                (view.roll_min, view.roll_max),
                0.0,
            ),
            CameraAxis::Fov => intersect_bounds(
                (camera.fov_min, camera.fov_max),
                (view.fov_min, view.fov_max),
                0.0,
            ),
        }
    }

    fn update_projections(&mut self) {
        self.pose = CameraPose::from_euler(self.yaw, self.pitch, self.roll);
        let aspect = self.resolution.aspect();
        let rotation = self.pose.quaternion();

        let distance = (self.view.camera_offset() + self.parallax) * CAMERA_RADIUS;
        let position = rotation * Vec3::new(0.0, 0.0, distance);
        self.perspective.fov = self.view.projection_fov(self.fov);
        self.perspective.aspect = aspect;
        self.perspective.position = position;
        self.perspective.view_matrix = Mat4::from_rotation_translation(rotation, position).inverse();

        self.orthographic.aspect = aspect;
        self.orthographic.zoom = self.zoom();
        self.orthographic.pan = Vec2::new(self.yaw, self.pitch);
    }

    fn update_complete(&mut self) {
        let changes = self.changelog;
        if changes.orientation_changed() {
            self.on_orientation_change.dispatch(&self.pose);
        }
        if changes.fov_changed() {
            self.on_fov_change.dispatch(&self.fov);
        }
        if !changes.is_empty() {
            self.on_change.dispatch(&changes);
        }
        self.changelog = ChangeFlags::empty();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Intersect camera bounds with view limits narrowed by `half` on each side.
///
/// Never returns an inverted pair: a view range narrower than the field of
/// view collapses to its midpoint, and camera bounds lying outside the view
/// range collapse to the nearest view edge.
fn intersect_bounds(camera: (f32, f32), view: (f32, f32), half: f32) -> (f32, f32) {
    let mut narrowed = (view.0 + half, view.1 - half);
    if narrowed.0 > narrowed.1 {
        let mid = (view.0 + view.1) * 0.5;
        narrowed = (mid, mid);
    }

    let bounds = (camera.0.max(narrowed.0), camera.1.min(narrowed.1));
    if bounds.0 <= bounds.1 {
        return bounds;
    }
    let mid = (camera.0 + camera.1) * 0.5;
    let point = if mid.is_nan() { narrowed.0 } else { clamp(mid, narrowed.0, narrowed.1) };
    (point, point)
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
