//! Triangle rasterization.
//!
//! The rasterizer decides which pixels a screen-space triangle covers and
//! resolves visibility with the depth buffer; a [`PixelShader`] decides what
//! color each covered pixel gets.

mod edgefunction;
mod shader;

pub use edgefunction::{EdgeFunctionRasterizer, EPSILON};
pub use shader::{FlatShader, PixelShader, SmoothShader};

use crate::math::vec3::Vec3;

/// A triangle corner after the viewport transform, with the attributes the
/// shader interpolates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenVertex {
    /// Pixel-space x and y; z is the real-valued depth.
    pub position: Vec3,
    /// Texture coordinate; only x (u) and y (v) are used.
    pub uv: Vec3,
    pub normal: Vec3,
}

impl ScreenVertex {
    pub const fn new(position: Vec3, uv: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            uv,
            normal,
        }
    }
}

/// A triangle ready for rasterization in screen space.
///
/// Attributes are stored with each corner, so reordering the corners keeps
/// them matched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [ScreenVertex; 3],
}

impl Triangle {
    pub fn new(vertices: [ScreenVertex; 3]) -> Self {
        Self { vertices }
    }

    /// `a0 + w1·(a1 - a0) + w2·(a2 - a0)` for the attribute picked by `attr`.
    #[inline]
    pub fn interpolate(&self, w1: f32, w2: f32, attr: impl Fn(&ScreenVertex) -> Vec3) -> Vec3 {
        let a0 = attr(&self.vertices[0]);
        let a1 = attr(&self.vertices[1]);
        let a2 = attr(&self.vertices[2]);
        a0 + (a1 - a0) * w1 + (a2 - a0) * w2
    }

    /// Rotate corners so the first corner becomes the second:
    /// `[a, b, c]` -> `[c, a, b]`. Winding is unchanged.
    pub(crate) fn rotated(&self) -> Self {
        let [a, b, c] = self.vertices;
        Self::new([c, a, b])
    }
}
