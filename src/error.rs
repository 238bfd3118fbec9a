//! Error types surfaced by resource loading and rendering.

use std::fmt;
use std::path::PathBuf;

use crate::mesh::LoadError;

/// A mesh or image file could not be opened, decoded or written.
#[derive(Debug)]
pub enum ResourceError {
    Mesh { path: PathBuf, source: LoadError },
    Image { path: PathBuf, source: image::ImageError },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Mesh { path, .. } => {
                write!(f, "failed to load mesh '{}'", path.display())
            }
            ResourceError::Image { path, .. } => {
                write!(f, "failed to read or write image '{}'", path.display())
            }
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Mesh { source, .. } => Some(source),
            ResourceError::Image { source, .. } => Some(source),
        }
    }
}

/// An interpolated texture coordinate fell outside `[0, 1]` while sampling
/// in [`SampleMode::Strict`](crate::texture::SampleMode::Strict).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingError {
    pub u: f32,
    pub v: f32,
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "texture coordinate ({}, {}) is outside [0, 1]",
            self.u, self.v
        )
    }
}

impl std::error::Error for SamplingError {}
