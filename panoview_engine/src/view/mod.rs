//! View family - screen/world mapping per projection type.
//!
//! A View is immutable once built. Changing the projection type means
//! building a new View; nothing is mutated in place.

mod view;
mod rectilinear;
mod fisheye;
mod flat;

pub use view::{View, ViewType, ViewLimits, ViewContext, screen_to_ndc, ndc_to_screen};
pub use rectilinear::RectilinearView;
pub use fisheye::{FisheyeView, FISHEYE_DISTANCE};
pub use flat::{FlatView, DEFAULT_FLAT_ASPECT};
