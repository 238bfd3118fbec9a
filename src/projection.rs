//! Projection, viewport and the combined vertex transform pipeline.
//!
//! A model-space vertex goes through `view`, then `projection`, is
//! dehomogenized exactly once, and is then mapped to pixels by `viewport`:
//!
//! ```text
//! screen = viewport · dehomogenize(projection · view · position)
//! ```

use crate::camera::Camera;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Simple perspective: identity except row 3, column 2 = `-1 / camera_distance`.
///
/// The resulting homogeneous coordinate is `w = 1 - z / c`, so points
/// further from the camera (more negative z) shrink after the divide.
pub fn projection_matrix(camera_distance: f32) -> Mat4 {
    let mut m = Mat4::identity();
    m.set(3, 2, -1.0 / camera_distance);
    m
}

/// Maps `[-1, 1]` onto `[0, width] x [0, height]` and depth onto `[0, depth]`.
///
/// Built as `scale(w/2, h/2, d/2) · translate(1, 1, 1)`.
pub fn viewport_matrix(width: u32, height: u32, depth: f32) -> Mat4 {
    Mat4::scaling(width as f32 / 2.0, height as f32 / 2.0, depth / 2.0)
        * Mat4::translation(1.0, 1.0, 1.0)
}

/// Precomputed matrices for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipeline {
    pub view: Mat4,
    pub projection: Mat4,
    pub viewport: Mat4,
}

impl Pipeline {
    /// `camera` of `None` leaves the view as identity, projecting positions
    /// directly.
    pub fn new(
        camera: Option<&Camera>,
        camera_distance: f32,
        width: u32,
        height: u32,
        depth: f32,
    ) -> Self {
        Self {
            view: camera.map_or_else(Mat4::identity, Camera::view_matrix),
            projection: projection_matrix(camera_distance),
            viewport: viewport_matrix(width, height, depth),
        }
    }

    /// `projection · view · point`, dehomogenized.
    #[inline]
    pub fn project(&self, point: Vec3) -> Vec3 {
        (self.projection * self.view * Vec4::point(point)).dehomogenize()
    }

    /// `viewport · point`, dehomogenized. Expects an already projected point.
    #[inline]
    pub fn to_screen(&self, point: Vec3) -> Vec3 {
        (self.viewport * Vec4::point(point)).dehomogenize()
    }
}
