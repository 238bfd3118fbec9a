//! Bounding-box triangle rasterization with barycentric weights.
//!
//! # Algorithm Overview
//!
//! 1. If the first and third corners share a y coordinate the weight
//!    equations divide by zero, so the corners are rotated once first.
//! 2. The triangle's bounding box is clamped to the frame buffer.
//! 3. For each integer pixel `P` in the box, solve
//!    `P = V0 + w1·(V1 - V0) + w2·(V2 - V0)` for `(w1, w2)`.
//! 4. `P` is covered when `w1 >= -ε`, `w2 >= -ε` and `w1 + w2 <= 1 + ε`.
//!    The tolerance deliberately lets pixels on a shared edge belong to both
//!    neighbouring triangles, so meshes have no seams.
//! 5. Depth is interpolated with the same weights and compared against the
//!    depth buffer; survivors are shaded and written.
//!
//! Winding does not matter here; back faces are culled before rasterization.

use super::shader::PixelShader;
use super::Triangle;
use crate::error::SamplingError;
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;

/// Coverage tolerance on the barycentric weights.
pub const EPSILON: f32 = 1e-4;

/// The two edge equations of a triangle, solved for a pixel position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeEquations {
    v0: Vec3,
    e1: Vec3,
    e2: Vec3,
    denominator: f32,
}

impl EdgeEquations {
    /// Returns `None` for configurations with no unique solution: zero-area
    /// triangles, non-finite corners, or `V2.y == V0.y`.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Self> {
        let e1 = v1 - v0;
        let e2 = v2 - v0;
        let denominator = e1.y * e2.x - e1.x * e2.y;
        if denominator == 0.0 || !denominator.is_finite() || e2.y == 0.0 {
            return None;
        }
        Some(Self {
            v0,
            e1,
            e2,
            denominator,
        })
    }

    /// Weights `(w1, w2)` of the point `(x, y)`.
    #[inline]
    pub fn weights(&self, x: f32, y: f32) -> (f32, f32) {
        let Self { v0, e1, e2, .. } = *self;
        let w1 = (v0.x * e2.y + (y - v0.y) * e2.x - x * e2.y) / self.denominator;
        let w2 = (y - v0.y - w1 * e1.y) / e2.y;
        (w1, w2)
    }

    /// The point with weights `(w1, w2)`; z is interpolated as well.
    #[inline]
    pub fn point(&self, w1: f32, w2: f32) -> Vec3 {
        self.v0 + self.e1 * w1 + self.e2 * w2
    }
}

/// Whether weights `(w1, w2)` lie inside the triangle, edges included.
#[inline]
pub fn covers(w1: f32, w2: f32) -> bool {
    w1 >= -EPSILON && w2 >= -EPSILON && w1 + w2 <= 1.0 + EPSILON
}

/// Triangle rasterizer testing every pixel of the clamped bounding box.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    /// Creates a new rasterizer instance.
    pub fn new() -> Self {
        EdgeFunctionRasterizer
    }

    /// Fill `triangle` into `buffer`, shading covered pixels that pass the
    /// depth test. Returns how many pixels were written.
    ///
    /// Triangles entirely off-screen or with zero area write nothing.
    pub fn fill_triangle<S: PixelShader>(
        &self,
        triangle: &Triangle,
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> Result<usize, SamplingError> {
        let triangle = if triangle.vertices[2].position.y == triangle.vertices[0].position.y {
            triangle.rotated()
        } else {
            *triangle
        };
        let [v0, v1, v2] = triangle.vertices.map(|v| v.position);

        let Some(edges) = EdgeEquations::new(v0, v1, v2) else {
            return Ok(0);
        };

        let min_x = v0.x.min(v1.x).min(v2.x).max(0.0);
        let max_x = v0.x.max(v1.x).max(v2.x).min(buffer.width() as f32 - 1.0);
        let min_y = v0.y.min(v1.y).min(v2.y).max(0.0);
        let max_y = v0.y.max(v1.y).max(v2.y).min(buffer.height() as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return Ok(0);
        }

        let mut written = 0;
        for y in min_y as u32..=max_y as u32 {
            for x in min_x as u32..=max_x as u32 {
                let (w1, w2) = edges.weights(x as f32, y as f32);
                if !covers(w1, w2) {
                    continue;
                }

                let z = edges.point(w1, w2).z;
                if buffer.test_and_set_depth(x, y, z) {
                    let color = shader.shade(&triangle, w1, w2)?;
                    buffer.set_pixel(x, y, color);
                    written += 1;
                }
            }
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::colors::{Color, BLACK, RED, WHITE};
    use crate::render::framebuffer::depth_buffer;
    use crate::render::rasterizer::{FlatShader, ScreenVertex};
    use crate::texture::{SampleMode, Texture};
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    fn tri(points: [(f32, f32, f32); 3]) -> Triangle {
        Triangle::new(points.map(|(x, y, z)| {
            ScreenVertex::new(Vec3::new(x, y, z), Vec3::new(0.5, 0.5, 0.0), Vec3::FORWARD)
        }))
    }

    /// Draw each triangle with its own solid color into a fresh buffer.
    fn render(size: u32, triangles: &[(Triangle, Color)]) -> Bitmap {
        let mut image = Bitmap::new(size, size);
        let mut depth = depth_buffer(size, size);
        let mut fb = FrameBuffer::new(&mut image, &mut depth);
        let rasterizer = EdgeFunctionRasterizer::new();
        for (triangle, color) in triangles {
            let texture = Texture::solid(*color);
            let shader = FlatShader::new(&texture, 1.0);
            rasterizer.fill_triangle(triangle, &mut fb, &shader).unwrap();
        }
        image
    }

    fn lit_pixels(image: &Bitmap) -> HashSet<(u32, u32)> {
        let mut lit = HashSet::new();
        for y in 0..image.height() {
            for x in 0..image.width() {
                if image.get(x, y) != Some(BLACK) {
                    lit.insert((x, y));
                }
            }
        }
        lit
    }

    /// Exact closed-triangle test on integer corners.
    fn in_hull(p: (i64, i64), corners: [(i64, i64); 3]) -> bool {
        let edge = |a: (i64, i64), b: (i64, i64)| (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
        let [a, b, c] = corners;
        let (e0, e1, e2) = (edge(a, b), edge(b, c), edge(c, a));
        (e0 >= 0 && e1 >= 0 && e2 >= 0) || (e0 <= 0 && e1 <= 0 && e2 <= 0)
    }

    #[test]
    fn single_triangle_fills_its_area() {
        let image = render(
            200,
            &[(tri([(10.0, 10.0, 0.0), (100.0, 10.0, 0.0), (55.0, 100.0, 0.0)]), WHITE)],
        );
        let lit = lit_pixels(&image);

        // Geometric area is 4050; counting the lattice points on the closed
        // boundary adds about half the perimeter.
        let count = lit.len() as i64;
        assert!((count - 4050).abs() <= 150, "filled {count} pixels");

        let corners = [(10, 10), (100, 10), (55, 100)];
        for &(x, y) in &lit {
            assert!(in_hull((x as i64, y as i64), corners), "({x}, {y}) outside");
            assert_eq!(image.get(x, y), Some(WHITE));
        }
    }

    #[test]
    fn shared_edge_leaves_no_seam() {
        let image = render(
            120,
            &[
                (tri([(10.0, 10.0, 0.0), (100.0, 10.0, 0.0), (100.0, 100.0, 0.0)]), RED),
                (tri([(10.0, 10.0, 0.0), (100.0, 100.0, 0.0), (10.0, 100.0, 0.0)]), WHITE),
            ],
        );
        for y in 10..=100 {
            for x in 10..=100 {
                assert_ne!(image.get(x, y), Some(BLACK), "gap at ({x}, {y})");
            }
        }
        // Nothing outside the square.
        assert_eq!(image.get(9, 50), Some(BLACK));
        assert_eq!(image.get(50, 101), Some(BLACK));
    }

    #[test]
    fn nearer_triangle_wins_regardless_of_order() {
        let far = (tri([(0.0, 0.0, 10.0), (60.0, 0.0, 10.0), (0.0, 60.0, 10.0)]), RED);
        let near = (tri([(10.0, 10.0, 20.0), (70.0, 10.0, 20.0), (10.0, 70.0, 20.0)]), WHITE);

        let a = render(80, &[far, near]);
        let b = render(80, &[near, far]);

        assert_eq!(a, b);
        assert_eq!(a.get(20, 20), Some(WHITE));
        assert_eq!(a.get(5, 5), Some(RED));
    }

    #[test]
    fn equal_depth_keeps_first_drawn() {
        let first = (tri([(0.0, 0.0, 5.0), (40.0, 0.0, 5.0), (0.0, 40.0, 5.0)]), RED);
        let second = (tri([(0.0, 0.0, 5.0), (40.0, 0.0, 5.0), (0.0, 40.0, 5.0)]), WHITE);
        let image = render(50, &[first, second]);
        assert_eq!(image.get(5, 5), Some(RED));
    }

    #[test]
    fn flat_bottom_relabel_preserves_coverage() {
        // First and third corners share y, which triggers the rotation.
        let guarded = render(
            120,
            &[(tri([(10.0, 10.0, 0.0), (60.0, 80.0, 0.0), (100.0, 10.0, 0.0)]), WHITE)],
        );
        let plain = render(
            120,
            &[(tri([(60.0, 80.0, 0.0), (100.0, 10.0, 0.0), (10.0, 10.0, 0.0)]), WHITE)],
        );
        let lit = lit_pixels(&guarded);
        assert!(!lit.is_empty());
        assert_eq!(lit, lit_pixels(&plain));
    }

    #[test]
    fn relabel_keeps_attributes_with_their_corners() {
        // Left half of the texture red, right half white; u follows x.
        let mut tex_image = Bitmap::new(2, 1);
        tex_image.set(0, 0, RED);
        tex_image.set(1, 0, WHITE);
        let texture = Texture::new(tex_image, SampleMode::Clamp);
        let shader = FlatShader::new(&texture, 1.0);

        let corner = |x: f32, y: f32| {
            ScreenVertex::new(Vec3::new(x, y, 0.0), Vec3::new(x / 100.0, 0.0, 0.0), Vec3::FORWARD)
        };
        let triangle = Triangle::new([corner(0.0, 0.0), corner(50.0, 90.0), corner(99.0, 0.0)]);

        let mut image = Bitmap::new(100, 100);
        let mut depth = depth_buffer(100, 100);
        let mut fb = FrameBuffer::new(&mut image, &mut depth);
        EdgeFunctionRasterizer::new()
            .fill_triangle(&triangle, &mut fb, &shader)
            .unwrap();

        assert_eq!(image.get(10, 2), Some(RED));
        assert_eq!(image.get(90, 2), Some(WHITE));
    }

    #[test]
    fn weights_round_trip() {
        let edges = EdgeEquations::new(
            Vec3::new(12.0, 7.0, 1.0),
            Vec3::new(93.5, 20.0, 2.0),
            Vec3::new(40.0, 88.25, 3.0),
        )
        .unwrap();

        for &(x, y) in &[(30.0, 30.0), (50.0, 20.0), (45.5, 60.0), (0.0, 0.0)] {
            let (w1, w2) = edges.weights(x, y);
            let p = edges.point(w1, w2);
            assert_relative_eq!(p.x, x, epsilon = 1e-3);
            assert_relative_eq!(p.y, y, epsilon = 1e-3);

            let (r1, r2) = edges.weights(p.x, p.y);
            assert_relative_eq!(r1, w1, epsilon = 1e-4);
            assert_relative_eq!(r2, w2, epsilon = 1e-4);
        }
    }

    #[test]
    fn weights_at_corners() {
        let v0 = Vec3::new(10.0, 10.0, 0.0);
        let v1 = Vec3::new(100.0, 10.0, 0.0);
        let v2 = Vec3::new(55.0, 100.0, 0.0);
        let edges = EdgeEquations::new(v0, v1, v2).unwrap();
        assert_eq!(edges.weights(v0.x, v0.y), (0.0, 0.0));
        assert_eq!(edges.weights(v1.x, v1.y), (1.0, 0.0));
        assert_eq!(edges.weights(v2.x, v2.y), (0.0, 1.0));
    }

    #[test]
    fn off_screen_triangle_writes_nothing() {
        let mut image = Bitmap::new(50, 50);
        let mut depth = depth_buffer(50, 50);
        let mut fb = FrameBuffer::new(&mut image, &mut depth);
        let texture = Texture::solid(WHITE);
        let shader = FlatShader::new(&texture, 1.0);
        let rasterizer = EdgeFunctionRasterizer::new();

        let right = tri([(60.0, 0.0, 0.0), (90.0, 0.0, 0.0), (70.0, 30.0, 0.0)]);
        let below = tri([(0.0, -40.0, 0.0), (30.0, -40.0, 0.0), (10.0, -5.0, 0.0)]);
        assert_eq!(rasterizer.fill_triangle(&right, &mut fb, &shader), Ok(0));
        assert_eq!(rasterizer.fill_triangle(&below, &mut fb, &shader), Ok(0));
        assert!(lit_pixels(&image).is_empty());
    }

    #[test]
    fn partially_visible_triangle_is_clipped_to_buffer() {
        let image = render(
            40,
            &[(tri([(-20.0, -20.0, 0.0), (80.0, 0.0, 0.0), (0.0, 80.0, 0.0)]), WHITE)],
        );
        assert_eq!(image.get(0, 0), Some(WHITE));
        assert_eq!(image.get(39, 0), Some(WHITE));
    }

    #[test]
    fn zero_area_triangle_writes_nothing() {
        let mut image = Bitmap::new(50, 50);
        let mut depth = depth_buffer(50, 50);
        let mut fb = FrameBuffer::new(&mut image, &mut depth);
        let texture = Texture::solid(WHITE);
        let shader = FlatShader::new(&texture, 1.0);
        let rasterizer = EdgeFunctionRasterizer::new();

        let collinear = tri([(0.0, 0.0, 0.0), (10.0, 10.0, 0.0), (20.0, 20.0, 0.0)]);
        let flat = tri([(0.0, 5.0, 0.0), (10.0, 5.0, 0.0), (20.0, 5.0, 0.0)]);
        assert_eq!(rasterizer.fill_triangle(&collinear, &mut fb, &shader), Ok(0));
        assert_eq!(rasterizer.fill_triangle(&flat, &mut fb, &shader), Ok(0));
    }

    #[test]
    fn strict_sampling_accepts_border_uvs() {
        let mut image = Bitmap::new(100, 100);
        let mut depth = depth_buffer(100, 100);
        let mut fb = FrameBuffer::new(&mut image, &mut depth);
        let texture = Texture::new(Bitmap::filled(4, 4, WHITE), SampleMode::Strict);
        let shader = FlatShader::new(&texture, 1.0);

        // Corner UVs sit exactly on the texture border; edge pixels
        // extrapolate slightly past it.
        let triangle = Triangle::new([
            ScreenVertex::new(Vec3::new(10.3, 10.7, 0.0), Vec3::new(0.0, 0.0, 0.0), Vec3::FORWARD),
            ScreenVertex::new(Vec3::new(90.1, 13.2, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::FORWARD),
            ScreenVertex::new(Vec3::new(40.6, 88.9, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::FORWARD),
        ]);

        let written = EdgeFunctionRasterizer::new()
            .fill_triangle(&triangle, &mut fb, &shader)
            .unwrap();
        assert!(written > 0);
        assert_eq!(image.get(40, 40), Some(WHITE));
    }

    #[test]
    fn strict_sampling_error_stops_the_fill() {
        let mut image = Bitmap::new(20, 20);
        let mut depth = depth_buffer(20, 20);
        let mut fb = FrameBuffer::new(&mut image, &mut depth);
        let texture = Texture::new(Bitmap::new(4, 4), SampleMode::Strict);
        let shader = FlatShader::new(&texture, 1.0);

        let mut triangle = tri([(0.0, 0.0, 0.0), (15.0, 0.0, 0.0), (0.0, 15.0, 0.0)]);
        triangle.vertices[1].uv = Vec3::new(3.0, 0.0, 0.0);

        let result = EdgeFunctionRasterizer::new().fill_triangle(&triangle, &mut fb, &shader);
        assert!(result.is_err());
    }
}
