/// Display devices - where a frame ends up (a window, or a VR headset).
///
/// The manager asks the display for one viewport per eye each frame and,
/// while presenting in VR, hands the finished stereo frame back with
/// `submit_frame()`.

use crate::camera::Eye;
use crate::error::Result;
use crate::graphics_device::Viewport;
use crate::math::Resolution;

/// One viewport of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub viewport: Viewport,
    pub eye: Eye,
}

pub trait DisplayDevice: Send {
    /// A VR presentation is active
    fn presenting_vr(&self) -> bool;

    /// Size of the drawing surface, both eyes included
    fn renderer_size(&self) -> Resolution;

    /// Viewports to render this frame: one (mono) or two (stereo)
    fn render_params(&self) -> Vec<RenderParams>;

    /// Hand the completed frame to the headset
    fn submit_frame(&mut self) -> Result<()>;

    /// Distance between the eyes, world units
    fn eye_separation(&self) -> f32 {
        0.0
    }

    /// Size or presentation state changed since the last call
    fn take_display_change(&mut self) -> bool {
        false
    }
}

/// Single full-surface viewport (desktop window)
#[derive(Debug, Clone)]
pub struct MonoDisplay {
    size: Resolution,
    changed: bool,
}

impl MonoDisplay {
    pub fn new(size: Resolution) -> Self {
        Self { size, changed: false }
    }

    pub fn set_size(&mut self, size: Resolution) {
        if size != self.size {
            self.size = size;
            self.changed = true;
        }
    }
}

impl DisplayDevice for MonoDisplay {
    fn presenting_vr(&self) -> bool {
        false
    }

    fn renderer_size(&self) -> Resolution {
        self.size
    }

    fn render_params(&self) -> Vec<RenderParams> {
        vec![RenderParams {
            viewport: Viewport::new(0.0, 0.0, self.size.width as f32, self.size.height as f32),
            eye: Eye::Mono,
        }]
    }

    fn submit_frame(&mut self) -> Result<()> {
        Ok(())
    }

    fn take_display_change(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

/// Side-by-side stereo display. Renders mono until presenting starts.
#[derive(Debug, Clone)]
pub struct SideBySideStereoDisplay {
    size: Resolution,
    eye_separation: f32,
    presenting: bool,
    submitted_frames: u64,
    changed: bool,
}

impl SideBySideStereoDisplay {
    pub fn new(size: Resolution, eye_separation: f32) -> Self {
        Self {
            size,
            eye_separation,
            presenting: false,
            submitted_frames: 0,
            changed: false,
        }
    }

    pub fn set_presenting(&mut self, presenting: bool) {
        if presenting != self.presenting {
            self.presenting = presenting;
            self.changed = true;
        }
    }

    pub fn set_size(&mut self, size: Resolution) {
        if size != self.size {
            self.size = size;
            self.changed = true;
        }
    }

    pub fn submitted_frames(&self) -> u64 {
        self.submitted_frames
    }
}

impl DisplayDevice for SideBySideStereoDisplay {
    fn presenting_vr(&self) -> bool {
        self.presenting
    }

    fn renderer_size(&self) -> Resolution {
        self.size
    }

    fn render_params(&self) -> Vec<RenderParams> {
        let width = self.size.width as f32;
        let height = self.size.height as f32;
        if !self.presenting {
            return vec![RenderParams { viewport: Viewport::new(0.0, 0.0, width, height), eye: Eye::Mono }];
        }
        let half = width * 0.5;
        vec![
            RenderParams { viewport: Viewport::new(0.0, 0.0, half, height), eye: Eye::Left },
            RenderParams { viewport: Viewport::new(half, 0.0, half, height), eye: Eye::Right },
        ]
    }

    fn submit_frame(&mut self) -> Result<()> {
        self.submitted_frames += 1;
        Ok(())
    }

    fn eye_separation(&self) -> f32 {
        self.eye_separation
    }

    fn take_display_change(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
