//! In-memory RGBA pixel buffer used both as render target and texture source.
//!
//! Pixels are stored row-major with row 0 first. The rasterizer treats row 0
//! as the bottom of the picture, so a buffer is flipped vertically right
//! before it is written (and textures right after they are read) to put the
//! stored origin at the bottom-left.

use std::path::Path;

use log::info;

use crate::colors::{Color, BLACK};
use crate::error::ResourceError;

#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

/// Number of pixels in a `width` x `height` buffer, computed in `usize`.
#[inline]
pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Row-major offset of `(x, y)`, computed in `usize`.
#[inline]
pub(crate) fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

impl Bitmap {
    /// A black, opaque buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, BLACK)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; pixel_count(width, height)],
        }
    }

    /// Decode an image file (format picked from its contents/extension).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| ResourceError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| Color::from_rgba(p.0)).collect();

        info!("loaded image {} ({}x{})", path.display(), width, height);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Encode as RGB into `path`; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ResourceError> {
        let path = path.as_ref();
        let img = image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let c = self.pixels[self.index(x, y)];
            image::Rgb([c.r, c.g, c.b])
        });
        img.save(path).map_err(|source| ResourceError::Image {
            path: path.to_path_buf(),
            source,
        })?;

        info!("wrote image {} ({}x{})", path.display(), self.width, self.height);
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        pixel_index(self.width, x, y)
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Set the color at (x, y). Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = color;
        }
    }

    /// Mirror the rows so the first row becomes the last.
    pub fn flip_vertically(&mut self) {
        let width = self.width as usize;
        let height = self.height as usize;
        for row in 0..height / 2 {
            let (top, bottom) = self.pixels.split_at_mut((height - 1 - row) * width);
            top[row * width..(row + 1) * width].swap_with_slice(&mut bottom[..width]);
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}
