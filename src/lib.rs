//! A CPU-only textured triangle rasterizer.
//!
//! A triangle mesh is projected through a look-at camera and a simple
//! perspective, back faces are culled, and the rest are filled with a
//! depth-tested, texture-mapped, Lambert-lit bounding-box rasterizer.
//!
//! # Quick Start
//!
//! ```no_run
//! use tinyraster::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mesh = Mesh::from_obj("obj/african_head/african_head.obj")?;
//! let texture = Texture::from_file("obj/african_head/african_head_diffuse.tga", SampleMode::Clamp)?;
//! let frame = Engine::new(mesh, texture, SceneConfig::default()).render()?;
//! frame.save("output.tga")?;
//! # Ok(())
//! # }
//! ```

// Public API - exposed to library consumers
pub mod bitmap;
pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod texture;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use engine::{Engine, Frame, RenderStats};
pub use error::{ResourceError, SamplingError};
pub use mesh::{LoadError, Mesh};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitmap::Bitmap;
    pub use crate::camera::Camera;
    pub use crate::colors::Color;
    pub use crate::config::{SceneConfig, ShadingMode};
    pub use crate::engine::{Engine, Frame, RenderStats};
    pub use crate::error::{ResourceError, SamplingError};
    pub use crate::light::DirectionalLight;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;
    pub use crate::mesh::{Face, LoadError, Mesh, VertexRef};
    pub use crate::texture::{SampleMode, Texture};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::rasterizer::{FlatShader, SmoothShader};
    pub use crate::render::{
        EdgeFunctionRasterizer, FrameBuffer, PixelShader, ScreenVertex, Triangle,
    };
    pub use crate::render::framebuffer::depth_buffer;
}
