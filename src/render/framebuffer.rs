//! Frame buffer abstraction for 2D pixel access with depth testing.
//!
//! The depth buffer holds screen-space z. Larger values are closer to the
//! camera, and every slot starts at [`DEPTH_CLEAR`] so the first surface
//! drawn anywhere always wins.

use crate::bitmap::{pixel_count, pixel_index, Bitmap};
use crate::colors::Color;

/// Far-away sentinel every depth slot is cleared to.
pub const DEPTH_CLEAR: f32 = f32::MIN;

/// Allocate a cleared depth buffer for a `width` x `height` target.
pub fn depth_buffer(width: u32, height: u32) -> Vec<f32> {
    vec![DEPTH_CLEAR; pixel_count(width, height)]
}

/// A view into a color image and its depth buffer.
///
/// This is a borrowed view, not an owning type: the frame driver owns both
/// buffers and lends them to the rasterizer for one frame.
pub struct FrameBuffer<'a> {
    image: &'a mut Bitmap,
    depth_buffer: &'a mut [f32],
}

impl<'a> FrameBuffer<'a> {
    /// # Panics
    /// Panics in debug builds if the depth buffer length doesn't match the image.
    pub fn new(image: &'a mut Bitmap, depth_buffer: &'a mut [f32]) -> Self {
        debug_assert_eq!(
            depth_buffer.len(),
            pixel_count(image.width(), image.height()),
            "Depth buffer size doesn't match image dimensions"
        );
        Self {
            image,
            depth_buffer,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Depth test at (x, y): if `depth` is strictly greater than the stored
    /// value, store it and return true. Equal depths keep the earlier surface.
    ///
    /// Callers must pass in-bounds coordinates.
    #[inline]
    pub fn test_and_set_depth(&mut self, x: u32, y: u32, depth: f32) -> bool {
        let idx = pixel_index(self.image.width(), x, y);
        if depth > self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            true
        } else {
            false
        }
    }

    /// Set a pixel without depth testing.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.image.set(x, y, color);
    }
}
