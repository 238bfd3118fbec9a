//! Rasterization back end: the frame buffer view and triangle filling.

pub mod framebuffer;
pub mod rasterizer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{EdgeFunctionRasterizer, PixelShader, ScreenVertex, Triangle};
