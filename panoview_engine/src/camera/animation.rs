/// Keyframed camera animation used by `Camera::look_at`.
///
/// The player never touches the camera itself: `advance` returns the
/// angles to apply and the camera feeds them through its clamping setters.

use std::f32::consts::PI;
use crate::math::lerp_angle;

/// Easing curve applied to a keyframe's normalized time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    QuadIn,
    QuadOut,
    #[default]
    QuadInOut,
    CubicInOut,
    SineInOut,
}

impl Easing {
    /// Map t ∈ [0, 1] to eased progress ∈ [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let f = 2.0 * t - 2.0;
                    0.5 * f * f * f + 1.0
                }
            }
            Easing::SineInOut => 0.5 * (1.0 - (PI * t).cos()),
        }
    }
}

/// Camera angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraAngles {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub fov: f32,
}

/// One animation segment. `None` fields keep the value reached so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub yaw: Option<f32>,
    pub pitch: Option<f32>,
    pub roll: Option<f32>,
    pub fov: Option<f32>,
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Keyframe {
    fn resolve(&self, from: CameraAngles) -> CameraAngles {
        CameraAngles {
            yaw: self.yaw.unwrap_or(from.yaw),
            pitch: self.pitch.unwrap_or(from.pitch),
            roll: self.roll.unwrap_or(from.roll),
            fov: self.fov.unwrap_or(from.fov),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationTrack {
    pub keyframes: Vec<Keyframe>,
}

impl AnimationTrack {
    pub fn new(keyframes: Vec<Keyframe>) -> Self {
        Self { keyframes }
    }

    pub fn single(keyframe: Keyframe) -> Self {
        Self { keyframes: vec![keyframe] }
    }

    pub fn duration_ms(&self) -> f32 {
        self.keyframes.iter().map(|k| k.duration_ms.max(0.0)).sum()
    }
}

/// Result of one `AnimationPlayer::advance` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStep {
    pub angles: CameraAngles,
    pub finished: bool,
}

#[derive(Debug, Default)]
pub struct AnimationPlayer {
    track: Option<AnimationTrack>,
    index: usize,
    elapsed_ms: f32,
    /// Angles at the start of the current keyframe
    from: CameraAngles,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `track` from the given angles, replacing any running track.
    pub fn play(&mut self, track: AnimationTrack, from: CameraAngles) {
        self.index = 0;
        self.elapsed_ms = 0.0;
        self.from = from;
        self.track = if track.keyframes.is_empty() { None } else { Some(track) };
    }

    pub fn stop(&mut self) {
        self.track = None;
        self.index = 0;
        self.elapsed_ms = 0.0;
    }

    pub fn is_playing(&self) -> bool {
        self.track.is_some()
    }

    /// Advance by `dt_ms`. `None` when nothing is playing.
    pub fn advance(&mut self, dt_ms: f32) -> Option<AnimationStep> {
        let track = self.track.as_ref()?;
        self.elapsed_ms += dt_ms.max(0.0);

        // consume finished keyframes, carrying the remainder over
        loop {
            let keyframe = track.keyframes[self.index];
            let duration = keyframe.duration_ms.max(0.0);
            if self.elapsed_ms < duration {
                let t = keyframe.easing.apply(self.elapsed_ms / duration);
                let to = keyframe.resolve(self.from);
                return Some(AnimationStep {
                    angles: interpolate(self.from, to, t),
                    finished: false,
                });
            }

            self.elapsed_ms -= duration;
            self.from = keyframe.resolve(self.from);
            self.index += 1;

            if self.index >= track.keyframes.len() {
                let angles = self.from;
                self.stop();
                return Some(AnimationStep { angles, finished: true });
            }
        }
    }
}

fn interpolate(from: CameraAngles, to: CameraAngles, t: f32) -> CameraAngles {
    CameraAngles {
        yaw: lerp_angle(from.yaw, to.yaw, t),
        pitch: from.pitch + (to.pitch - from.pitch) * t,
        roll: lerp_angle(from.roll, to.roll, t),
        fov: from.fov + (to.fov - from.fov) * t,
    }
}

#[cfg(test)]
#[path = "animation_tests.rs"]
mod tests;
