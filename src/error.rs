//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::GpuInitError;

/// Errors produced by the geoline crate.
#[derive(Debug)]
pub enum GeolineError {
    /// GPU context initialization failure.
    Gpu(GpuInitError),
    /// WGSL composition failed (bad `#import`, parse or validation error).
    ShaderCompose(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Line records could not be decoded.
    DataParse(String),
    /// An instanced attribute was declared with a component count the
    /// vertex pipeline cannot express.
    UnsupportedAttributeSize {
        /// Attribute name.
        name: &'static str,
        /// Declared number of floats per instance.
        size: usize,
    },
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for GeolineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::ShaderCompose(msg) => {
                write!(f, "shader composition error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::DataParse(msg) => write!(f, "data parse error: {msg}"),
            Self::UnsupportedAttributeSize { name, size } => {
                write!(f, "attribute '{name}' has unsupported size {size}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for GeolineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GpuInitError> for GeolineError {
    fn from(e: GpuInitError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for GeolineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
