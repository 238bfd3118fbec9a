//! Core rendering engine.
//!
//! The [`Engine`] owns the mesh, the diffuse texture and the scene settings
//! and turns them into a [`Frame`]. Each face is projected, culled if it
//! faces away, mapped to pixels and handed to the rasterizer with the shader
//! the scene asks for.

use std::path::Path;

use log::debug;

use crate::bitmap::Bitmap;
use crate::config::{SceneConfig, ShadingMode};
use crate::error::{ResourceError, SamplingError};
use crate::math::vec3::Vec3;
use crate::mesh::{Face, Mesh};
use crate::projection::Pipeline;
use crate::render::framebuffer::{depth_buffer, FrameBuffer};
use crate::render::rasterizer::{
    EdgeFunctionRasterizer, FlatShader, ScreenVertex, SmoothShader, Triangle,
};
use crate::texture::Texture;

/// Per-frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Faces visited.
    pub faces: usize,
    /// Faces skipped because they face away from the camera.
    pub culled: usize,
    /// Faces handed to the rasterizer.
    pub drawn: usize,
    /// Pixels written, counting overdraw.
    pub pixels: usize,
}

/// The result of one render: color image, final depth values and counters.
///
/// Row 0 of `image` is the bottom of the scene; [`Frame::save`] flips it
/// for the file.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: Bitmap,
    pub depth: Vec<f32>,
    pub stats: RenderStats,
}

impl Frame {
    /// Flip so the origin lands bottom-left, then write the image.
    pub fn save<P: AsRef<Path>>(mut self, path: P) -> Result<(), ResourceError> {
        self.image.flip_vertically();
        self.image.save(path)
    }
}

pub struct Engine {
    mesh: Mesh,
    texture: Texture,
    config: SceneConfig,
    pipeline: Pipeline,
    rasterizer: EdgeFunctionRasterizer,
}

impl Engine {
    pub fn new(mesh: Mesh, texture: Texture, config: SceneConfig) -> Self {
        let pipeline = Pipeline::new(
            config.camera.as_ref(),
            config.camera_distance,
            config.width,
            config.height,
            config.depth,
        );

        Self {
            mesh,
            texture,
            config,
            pipeline,
            rasterizer: EdgeFunctionRasterizer::new(),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Render every face of the mesh into a fresh image.
    ///
    /// Only fails when the texture's sample mode rejects an interpolated
    /// coordinate.
    pub fn render(&self) -> Result<Frame, SamplingError> {
        let width = self.config.width;
        let height = self.config.height;
        let mut image = Bitmap::new(width, height);
        let mut depth = depth_buffer(width, height);
        let mut stats = RenderStats::default();

        {
            let mut buffer = FrameBuffer::new(&mut image, &mut depth);
            for face in self.mesh.faces() {
                stats.faces += 1;

                let Some(triangle) = self.screen_triangle(face) else {
                    stats.culled += 1;
                    continue;
                };

                let pixels = match self.config.shading {
                    ShadingMode::Flat => {
                        let shader = FlatShader::new(&self.texture, self.flat_intensity(face));
                        self.rasterizer.fill_triangle(&triangle, &mut buffer, &shader)?
                    }
                    ShadingMode::Smooth => {
                        let shader = SmoothShader::new(&self.texture, self.config.light);
                        self.rasterizer.fill_triangle(&triangle, &mut buffer, &shader)?
                    }
                };
                stats.drawn += 1;
                stats.pixels += pixels;
            }
        }

        debug!(
            "rendered {} faces: {} culled, {} drawn, {} pixels written",
            stats.faces, stats.culled, stats.drawn, stats.pixels
        );

        Ok(Frame {
            image,
            depth,
            stats,
        })
    }

    /// Project a face to screen space, or `None` if it is back-facing or
    /// edge-on.
    fn screen_triangle(&self, face: &Face) -> Option<Triangle> {
        let projected = face
            .corners
            .map(|corner| self.pipeline.project(self.mesh.position(corner.position)));

        // Winding test on the projected corners, before the viewport.
        let normal = (projected[1] - projected[0])
            .cross(projected[2] - projected[1])
            .normalize();
        if normal.z.is_nan() || normal.z <= 0.0 {
            return None;
        }

        let mut vertices = [ScreenVertex::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO); 3];
        for (i, corner) in face.corners.iter().enumerate() {
            vertices[i] = ScreenVertex::new(
                self.pipeline.to_screen(projected[i]),
                self.mesh.texture_coord(corner.texcoord),
                self.mesh.normal(corner.normal),
            );
        }
        Some(Triangle::new(vertices))
    }

    /// Light intensity from the face's model-space geometric normal.
    fn flat_intensity(&self, face: &Face) -> f32 {
        let [p0, p1, p2] = face.corners.map(|c| self.mesh.position(c.position));
        let normal = (p1 - p0).cross(p2 - p0).normalize();
        self.config.light.intensity(normal)
    }
}
