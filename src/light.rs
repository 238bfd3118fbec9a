//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// `direction` points from the surface toward the light, so a normal facing
/// the light gets a positive intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
}

impl DirectionalLight {
    /// Create a new directional light. The direction is normalized.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
        }
    }

    /// Lambertian factor `normal · direction`.
    ///
    /// The normal is used as given: interpolated vertex normals are not
    /// renormalized, and negative results are left for color clamping.
    #[inline]
    pub fn intensity(&self, normal: Vec3) -> f32 {
        normal.dot(self.direction)
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_direct_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(light.intensity(Vec3::FORWARD), 1.0);
    }

    #[test]
    fn test_facing_away_is_negative() {
        let light = DirectionalLight::new(Vec3::FORWARD);
        assert_relative_eq!(light.intensity(-Vec3::FORWARD), -1.0);
    }

    #[test]
    fn test_angled_illumination() {
        // Default light comes from (0, 1, 1); a +Z normal sees cos(45deg).
        let light = DirectionalLight::default();
        assert_relative_eq!(
            light.intensity(Vec3::FORWARD),
            std::f32::consts::FRAC_1_SQRT_2,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_normal_length_is_not_corrected() {
        let light = DirectionalLight::new(Vec3::FORWARD);
        assert_relative_eq!(light.intensity(Vec3::new(0.0, 0.0, 0.5)), 0.5);
    }
}
