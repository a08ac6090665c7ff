/// Media sources consumed by the background renderers.
///
/// The engine never decodes media itself. A host-provided `MediaAsset`
/// hands over decoded RGBA8 surfaces; video assets additionally yield a
/// new frame from `poll_frame()` whenever one is available.

use std::fmt;
use std::str::FromStr;
use serde::Deserialize;

use crate::graphics_device::TextureKind;

/// Projection of the source media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaFormat {
    #[default]
    Equirectangular,
    Cube,
    Flat,
    /// Any format string the engine does not recognize
    Unknown,
}

impl MediaFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFormat::Equirectangular => "equirectangular",
            MediaFormat::Cube => "cube",
            MediaFormat::Flat => "flat",
            MediaFormat::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "equirectangular" | "equirect" | "sphere" => MediaFormat::Equirectangular,
            "cube" | "cubemap" => MediaFormat::Cube,
            "flat" => MediaFormat::Flat,
            _ => MediaFormat::Unknown,
        })
    }
}

impl<'de> Deserialize<'de> for MediaFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or(MediaFormat::Unknown))
    }
}

/// Decoded pixels of a media surface (RGBA8, tightly packed)
#[derive(Debug, Clone, PartialEq)]
pub enum SurfacePixels {
    Image(Vec<u8>),
    /// Six faces ordered +X, -X, +Y, -Y, +Z, -Z
    Cube(Vec<Vec<u8>>),
}

/// A GPU-uploadable image or video frame
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSurface {
    /// Width in pixels (per face for cube surfaces)
    pub width: u32,
    /// Height in pixels (per face for cube surfaces)
    pub height: u32,
    pub pixels: SurfacePixels,
}

impl MediaSurface {
    pub fn image(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self { width, height, pixels: SurfacePixels::Image(pixels) }
    }

    pub fn cube(size: u32, faces: Vec<Vec<u8>>) -> Self {
        Self { width: size, height: size, pixels: SurfacePixels::Cube(faces) }
    }

    pub fn texture_kind(&self) -> TextureKind {
        match self.pixels {
            SurfacePixels::Image(_) => TextureKind::D2,
            SurfacePixels::Cube(_) => TextureKind::Cube,
        }
    }

    /// width / height, 1.0 for a degenerate surface
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Host-side media asset (image or video) backing a scene
pub trait MediaAsset: Send {
    /// The asset finished loading and `surface()` is available
    fn is_ready(&self) -> bool;

    fn format(&self) -> MediaFormat;

    /// Current surface (first frame for videos)
    fn surface(&self) -> Option<&MediaSurface>;

    /// Next video frame, if a new one was decoded since the last poll
    fn poll_frame(&mut self) -> Option<MediaSurface> {
        None
    }

    /// The asset switched to another quality level since the last call
    fn take_quality_change(&mut self) -> bool {
        false
    }

    /// Release the media and its audio companion
    fn release(&mut self);
}

/// Still image asset, ready immediately
#[derive(Debug, Clone)]
pub struct StaticMedia {
    format: MediaFormat,
    surface: Option<MediaSurface>,
}

impl StaticMedia {
    pub fn new(format: MediaFormat, surface: MediaSurface) -> Self {
        Self { format, surface: Some(surface) }
    }

    pub fn is_released(&self) -> bool {
        self.surface.is_none()
    }
}

impl MediaAsset for StaticMedia {
    fn is_ready(&self) -> bool {
        self.surface.is_some()
    }

    fn format(&self) -> MediaFormat {
        self.format
    }

    fn surface(&self) -> Option<&MediaSurface> {
        self.surface.as_ref()
    }

    fn release(&mut self) {
        self.surface = None;
    }
}
