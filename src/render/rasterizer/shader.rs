//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer handles coverage, barycentric weights and the depth test;
//! the shader turns the weights plus the triangle's per-vertex attributes
//! into a color. Both shaders here sample the diffuse texture at the
//! interpolated UV and differ only in where the light intensity comes from.
//!
//! Interpolation happens in screen space; there is no perspective
//! correction.

use super::Triangle;
use crate::colors::Color;
use crate::error::SamplingError;
use crate::light::DirectionalLight;
use crate::texture::Texture;

/// Trait for per-pixel shading computations.
///
/// The rasterizer calls `shade()` for each pixel that passes the depth test.
/// `w1` and `w2` express the pixel as `V0 + w1·(V1 - V0) + w2·(V2 - V0)`.
pub trait PixelShader {
    fn shade(&self, triangle: &Triangle, w1: f32, w2: f32) -> Result<Color, SamplingError>;
}

/// Flat shader: one precomputed intensity for the whole triangle.
pub struct FlatShader<'a> {
    texture: &'a Texture,
    intensity: f32,
}

impl<'a> FlatShader<'a> {
    pub fn new(texture: &'a Texture, intensity: f32) -> Self {
        Self { texture, intensity }
    }
}

impl PixelShader for FlatShader<'_> {
    #[inline]
    fn shade(&self, triangle: &Triangle, w1: f32, w2: f32) -> Result<Color, SamplingError> {
        let uv = triangle.interpolate(w1, w2, |v| v.uv);
        Ok(self.texture.sample(uv.x, uv.y)?.scale(self.intensity))
    }
}

/// Smooth shader: intensity from the vertex normals interpolated at the pixel.
pub struct SmoothShader<'a> {
    texture: &'a Texture,
    light: DirectionalLight,
}

impl<'a> SmoothShader<'a> {
    pub fn new(texture: &'a Texture, light: DirectionalLight) -> Self {
        Self { texture, light }
    }
}

impl PixelShader for SmoothShader<'_> {
    #[inline]
    fn shade(&self, triangle: &Triangle, w1: f32, w2: f32) -> Result<Color, SamplingError> {
        let uv = triangle.interpolate(w1, w2, |v| v.uv);
        let normal = triangle.interpolate(w1, w2, |v| v.normal);
        let intensity = self.light.intensity(normal);
        Ok(self.texture.sample(uv.x, uv.y)?.scale(intensity))
    }
}
