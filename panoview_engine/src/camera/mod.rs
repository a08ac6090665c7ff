//! Camera module - navigation state, projections and per-frame snapshots.
//!
//! `Camera` is the stateful controller (bounded yaw/pitch/roll/fov, look-at
//! animation, change signals). `RenderCamera` is the passive per-eye
//! snapshot it produces for rendering.

mod camera;
mod changelog;
mod config;
mod projection;
mod animation;
mod render_camera;

pub use camera::{Camera, CameraAxis, LookAt, CAMERA_RADIUS};
pub use changelog::ChangeFlags;
pub use config::{AxisConfig, CameraBounds, CameraConfig, DEFAULT_FOV_DEGREES};
pub use projection::{OrthographicProjection, PerspectiveProjection, DEFAULT_NEAR, DEFAULT_FAR};
pub use animation::{AnimationPlayer, AnimationStep, AnimationTrack, CameraAngles, Easing, Keyframe};
pub use render_camera::{Eye, ProjectionKind, RenderCamera};
