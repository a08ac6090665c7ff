//! Math helpers - angle conversion, wrapping, clamping and camera poses.
//!
//! Radians are the canonical unit everywhere inside the engine.
//! Degrees only appear at configuration boundaries.

mod angle;
mod pose;
mod resolution;

pub use angle::{
    AngleUnit, to_radians, to_degrees, wrap_angle, clamp, lerp_angle, approx_eq,
};
pub use pose::CameraPose;
pub use resolution::Resolution;
