/// Angle helpers shared by the camera, the views and the animation player.

use std::f32::consts::{PI, TAU};
use serde::Deserialize;

/// Unit of an angle passed across the public API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Radians (internal unit)
    #[default]
    Radians,
    /// Degrees (configuration / UI unit)
    Degrees,
}

impl AngleUnit {
    /// Convert `value` expressed in this unit to radians.
    pub fn to_radians(self, value: f32) -> f32 {
        match self {
            AngleUnit::Radians => value,
            AngleUnit::Degrees => to_radians(value),
        }
    }

    /// Convert a radian value to this unit.
    pub fn from_radians(self, value: f32) -> f32 {
        match self {
            AngleUnit::Radians => value,
            AngleUnit::Degrees => to_degrees(value),
        }
    }
}

/// Degrees to radians. Infinities are preserved.
pub fn to_radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

/// Radians to degrees. Infinities are preserved.
pub fn to_degrees(radians: f32) -> f32 {
    radians * (180.0 / PI)
}

/// Wrap an angle into [-π, π].
///
/// π itself is kept as π (not folded to -π) so a value that was already in
/// range is returned unchanged.
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }
    if (-PI..=PI).contains(&angle) {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped == -PI && angle > 0.0 {
        PI
    } else {
        wrapped
    }
}

/// Clamp `value` into [min, max]. Bounds may be infinite.
///
/// If the bounds are inverted the midpoint is returned.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return (min + max) * 0.5;
    }
    value.max(min).min(max)
}

/// Interpolate between two angles along the shortest arc.
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let delta = wrap_angle(to - from);
    wrap_angle(from + delta * t)
}

/// Absolute-epsilon float comparison.
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

#[cfg(test)]
#[path = "angle_tests.rs"]
mod tests;
