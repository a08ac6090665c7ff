//! Error types for the Panoview engine
//!
//! This module defines the error types used throughout the engine:
//! GPU backend failures, device initialization, resource misuse and
//! unsupported view / background / media types.
//!
//! Invalid numeric camera input is never an error (the setters ignore it),
//! and a screen/world mapping miss is an `Option::None`, not an error.

use std::fmt;

/// Result type for Panoview engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Panoview engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (GPU API failure, lost device, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, render target, program, mesh)
    InvalidResource(String),

    /// Initialization failed (graphics device, context, subsystems)
    InitializationFailed(String),

    /// Unsupported view, background or media type
    UnsupportedType(String),

    /// Malformed scene or render configuration
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::UnsupportedType(msg) => write!(f, "Unsupported type: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an error, logging it first at ERROR severity with file:line.
///
/// The bare form produces a `BackendError`; the `Variant =>` form picks
/// another message-carrying variant.
///
/// ```ignore
/// let err = engine_err!("panoview::View", "unknown view type '{}'", name);
/// let err = engine_err!("panoview::View", UnsupportedType => "unknown view '{}'", name);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident => $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::panoview::Error::$variant(message)
    }};
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::panoview::Error::BackendError(message)
    }};
}

/// Log and return an error from the current function.
///
/// Same forms as [`engine_err!`].
#[macro_export]
macro_rules! engine_bail {
    ($($arg:tt)*) => {
        return Err($crate::engine_err!($($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
