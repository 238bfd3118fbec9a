//! Look-at camera.
//!
//! # Coordinate System
//!
//! Right-handed camera space:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer (the camera looks down -Z)
//!
//! Points nearer the eye therefore end up with larger z, which is what the
//! depth test keeps.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// A camera placed at `eye`, aimed at `center`, with `up` fixing its roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub const fn new(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        Self { eye, center, up }
    }

    /// Distance from the eye to the point it looks at.
    pub fn distance(&self) -> f32 {
        (self.eye - self.center).magnitude()
    }

    /// Builds the world -> camera matrix.
    ///
    /// The basis is `k = normalize(eye - center)`, `i = normalize(up x k)`,
    /// `j = k x i`. Its vectors become the rotation rows and the translation
    /// by `-eye` is applied before the rotation, so the eye lands on the
    /// origin.
    ///
    /// `up` must not be parallel to `eye - center`; in that case `i` is a
    /// zero vector and the matrix is full of NaNs.
    pub fn view_matrix(&self) -> Mat4 {
        let k = (self.eye - self.center).normalize();
        let i = self.up.cross(k).normalize();
        let j = k.cross(i);

        let mut rotation = Mat4::identity();
        let mut translation = Mat4::identity();
        for r in 0..3 {
            rotation.set(0, r, i[r]);
            rotation.set(1, r, j[r]);
            rotation.set(2, r, k[r]);
            translation.set(r, 3, -self.eye[r]);
        }

        rotation * translation
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(-1.0, 1.0, 3.0), Vec3::ZERO, Vec3::UP)
    }
}
