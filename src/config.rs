//! Scene configuration: everything about a render that is not the mesh or
//! the texture. Built once per invocation and never mutated while rendering.

use crate::camera::Camera;
use crate::light::DirectionalLight;
use crate::texture::SampleMode;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 800;
/// Upper end of the viewport's depth range.
pub const DEFAULT_DEPTH: f32 = 255.0;
pub const DEFAULT_CAMERA_DISTANCE: f32 = 10.0;

/// How per-pixel light intensity is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// One intensity per face from its geometric normal.
    Flat,
    /// Vertex normals interpolated across the face.
    #[default]
    Smooth,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    pub depth: f32,
    /// `None` projects positions without a view transform.
    pub camera: Option<Camera>,
    /// `c` in the projection's `w = 1 - z / c`.
    pub camera_distance: f32,
    pub light: DirectionalLight,
    pub shading: ShadingMode,
    pub sample_mode: SampleMode,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            depth: DEFAULT_DEPTH,
            camera: Some(Camera::default()),
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            light: DirectionalLight::default(),
            shading: ShadingMode::default(),
            sample_mode: SampleMode::default(),
        }
    }
}
