/*!
# Panoview Engine

Rendering core of a panoramic / VR media viewer.

This crate turns a panoramic image or video into frames: a camera steered
in yaw / pitch / roll / fov, one of several projections (views), a
background renderer that draws the media, and a post-processing pipeline
that composites scene layers and effects on top. The GPU is reached only
through the `GraphicsDevice` traits, so backends (WebGL-like, wgpu, ...)
live outside this crate.

## Architecture

- **View**: projection family (rectilinear, fisheye, flat) with screen/world mapping
- **Camera**: clamped angles, changelog + signals, animations, per-eye snapshots
- **BackgroundRenderer**: mesh or shader variant drawing the media into a target
- **RenderPipeline**: main compositor + scene / picking sub-compositors
- **RenderManager**: scene events, view switches, per-frame update and render
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod signal;
pub mod math;
pub mod view;
pub mod camera;
pub mod graphics_device;
pub mod background;
pub mod render_pipeline;
pub mod manager;

// Main panoview namespace module
pub mod panoview {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine (global logger)
    pub use crate::engine::Engine;

    // Orchestrator
    pub use crate::manager::RenderManager;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    pub mod math {
        pub use crate::math::*;
    }

    pub mod view {
        pub use crate::view::*;
    }

    pub mod camera {
        pub use crate::camera::*;
        pub use crate::signal::{ListenerId, Signal};
    }

    // GPU abstraction implemented by backends
    pub mod render {
        pub use crate::graphics_device::*;
    }

    pub mod background {
        pub use crate::background::*;
    }

    pub mod pipeline {
        pub use crate::render_pipeline::*;
    }

    pub mod manager {
        pub use crate::manager::*;
    }
}

// Re-export math library at crate root
pub use glam;
