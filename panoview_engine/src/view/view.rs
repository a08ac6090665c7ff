/// View - closed set of projection strategies behind one interface.
///
/// Every variant maps screen points to unit world directions and back,
/// converts the camera's vertical fov to the fov the projection matrix
/// needs, and exposes constant angular limits.
///
/// `None` from a mapping function means "no intersection" (the point is
/// outside the projectable area). It is an expected outcome, not an error.

use std::str::FromStr;
use glam::{Quat, Vec2, Vec3};
use crate::error::Error;
use crate::math::Resolution;
use super::{RectilinearView, FisheyeView, FlatView};

/// Projection type requested by a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewType {
    /// Standard perspective projection
    Rectilinear,
    /// Wide-angle fisheye ("GoPro" look)
    Fisheye,
    /// Flat media viewed with an orthographic camera
    Flat,
}

impl ViewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Rectilinear => "rectilinear",
            ViewType::Fisheye => "fisheye",
            ViewType::Flat => "flat",
        }
    }
}

impl FromStr for ViewType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rectilinear" => Ok(ViewType::Rectilinear),
            "gopro" | "fisheye" => Ok(ViewType::Fisheye),
            "flat" => Ok(ViewType::Flat),
            other => Err(crate::engine_err!("panoview::View",
                UnsupportedType => "unknown view type '{}'", other)),
        }
    }
}

/// Angular limits of a view, in radians (possibly infinite).
///
/// For the flat view, yaw and pitch are pan offsets in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewLimits {
    pub yaw_min: f32,
    pub yaw_max: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub roll_min: f32,
    pub roll_max: f32,
    pub fov_min: f32,
    pub fov_max: f32,
}

/// Camera state needed by the mapping functions.
///
/// Built by `Camera::view_context()`; the view never reaches back into
/// the camera.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext {
    /// Camera rotation (world from view)
    pub orientation: Quat,
    /// Vertical fov, radians
    pub fov: f32,
    /// Flat-view pan (yaw, pitch) in canvas units
    pub pan: Vec2,
    /// Flat-view zoom factor
    pub zoom: f32,
    /// Canvas size in pixels
    pub resolution: Resolution,
}

/// Screen pixel (origin top-left, y down) to NDC. `None` off-canvas.
pub fn screen_to_ndc(point: Vec2, resolution: Resolution) -> Option<Vec2> {
    if resolution.is_empty() {
        return None;
    }
    let (w, h) = (resolution.width as f32, resolution.height as f32);
    if point.x < 0.0 || point.x > w || point.y < 0.0 || point.y > h {
        return None;
    }
    Some(Vec2::new(2.0 * point.x / w - 1.0, 1.0 - 2.0 * point.y / h))
}

/// NDC to screen pixel. `None` when outside [-1, 1] (with a small tolerance).
pub fn ndc_to_screen(ndc: Vec2, resolution: Resolution) -> Option<Vec2> {
    const TOLERANCE: f32 = 1e-4;
    if !ndc.is_finite() || ndc.x.abs() > 1.0 + TOLERANCE || ndc.y.abs() > 1.0 + TOLERANCE {
        return None;
    }
    let (w, h) = (resolution.width as f32, resolution.height as f32);
    Some(Vec2::new((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h))
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Rectilinear(RectilinearView),
    Fisheye(FisheyeView),
    Flat(FlatView),
}

impl View {
    /// Build a view with the default parameters of its type.
    pub fn new(view_type: ViewType) -> Self {
        match view_type {
            ViewType::Rectilinear => View::Rectilinear(RectilinearView::new()),
            ViewType::Fisheye => View::Fisheye(FisheyeView::new()),
            ViewType::Flat => View::Flat(FlatView::new()),
        }
    }

    pub fn view_type(&self) -> ViewType {
        match self {
            View::Rectilinear(_) => ViewType::Rectilinear,
            View::Fisheye(_) => ViewType::Fisheye,
            View::Flat(_) => ViewType::Flat,
        }
    }

    pub fn limits(&self) -> &ViewLimits {
        match self {
            View::Rectilinear(v) => v.limits(),
            View::Fisheye(v) => v.limits(),
            View::Flat(v) => v.limits(),
        }
    }

    /// Unit world direction under `point`, or `None` outside the projectable area.
    pub fn screen_to_world(&self, ctx: &ViewContext, point: Vec2) -> Option<Vec3> {
        match self {
            View::Rectilinear(v) => v.screen_to_world(ctx, point),
            View::Fisheye(v) => v.screen_to_world(ctx, point),
            View::Flat(v) => v.screen_to_world(ctx, point),
        }
    }

    /// Screen pixel of a world direction, or `None` when behind the camera
    /// or outside the representable fov.
    pub fn world_to_screen(&self, ctx: &ViewContext, direction: Vec3, parallax: f32) -> Option<Vec2> {
        match self {
            View::Rectilinear(v) => v.world_to_screen(ctx, direction, parallax),
            View::Fisheye(v) => v.world_to_screen(ctx, direction, parallax),
            View::Flat(v) => v.world_to_screen(ctx, direction),
        }
    }

    /// Convert the camera's vertical fov to the projection matrix fov.
    pub fn projection_fov(&self, fov: f32) -> f32 {
        match self {
            View::Rectilinear(_) | View::Flat(_) => fov,
            View::Fisheye(v) => v.projection_fov(fov),
        }
    }

    /// Distance (in sphere radii) the perspective camera sits behind the
    /// sphere center, before parallax.
    pub fn camera_offset(&self) -> f32 {
        match self {
            View::Fisheye(v) => v.distance(),
            View::Rectilinear(_) | View::Flat(_) => 0.0,
        }
    }

    /// Whether hit testing goes through the picking compositors.
    ///
    /// Rectilinear views can ray-cast natively; projected views cannot.
    pub fn uses_picking_buffer(&self) -> bool {
        !matches!(self, View::Rectilinear(_))
    }
}

impl Default for View {
    fn default() -> Self {
        View::new(ViewType::Rectilinear)
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
