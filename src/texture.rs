use std::path::Path;

use crate::bitmap::Bitmap;
use crate::colors::Color;
use crate::error::{ResourceError, SamplingError};
use crate::render::rasterizer::EPSILON;

/// How far past `[0, 1]` a coordinate may land and still count as inside
/// in [`SampleMode::Strict`].
///
/// Border pixels are covered with weights down to `-EPSILON`, and at most
/// two of the three corner weights can go negative, so interpolated
/// coordinates overshoot by up to `2 * EPSILON`. The rest is float slack.
pub const STRICT_TOLERANCE: f32 = 4.0 * EPSILON;

/// What to do with texture coordinates that land outside `[0, 1]`.
///
/// Interpolated coordinates on triangle borders can overshoot slightly
/// because the rasterizer over-includes edge pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleMode {
    /// Clamp the texel address onto the texture's edge.
    #[default]
    Clamp,
    /// Wrap around (tile) using the fractional part of the coordinate.
    Repeat,
    /// Reject coordinates further than [`STRICT_TOLERANCE`] outside `[0, 1]`
    /// with a [`SamplingError`]; smaller overshoots are clamped.
    Strict,
}

/// Represents a 2D diffuse texture for texture mapping.
#[derive(Debug, Clone)]
pub struct Texture {
    image: Bitmap,
    mode: SampleMode,
}

impl Texture {
    /// Wrap an image whose row 0 is the bottom row (v = 0).
    pub fn new(image: Bitmap, mode: SampleMode) -> Self {
        Self { image, mode }
    }

    /// A 1x1 texture of a single color; handy for untextured meshes.
    pub fn solid(color: Color) -> Self {
        Self::new(Bitmap::filled(1, 1, color), SampleMode::Clamp)
    }

    /// Load a texture from an image file (TGA, PNG, JPG, ...).
    ///
    /// Image files store their top row first, texture space has v pointing
    /// up, so the decoded image is flipped once here.
    pub fn from_file<P: AsRef<Path>>(path: P, mode: SampleMode) -> Result<Self, ResourceError> {
        let mut image = Bitmap::load(path)?;
        image.flip_vertically();
        Ok(Self::new(image, mode))
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// The texel address is `(u * width, v * height)` truncated toward zero,
    /// then resolved according to the texture's [`SampleMode`].
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Result<Color, SamplingError> {
        let width = self.image.width();
        let height = self.image.height();

        let (u, v) = match self.mode {
            SampleMode::Clamp => (u, v),
            SampleMode::Repeat => (u.rem_euclid(1.0), v.rem_euclid(1.0)),
            SampleMode::Strict => {
                let range = -STRICT_TOLERANCE..=1.0 + STRICT_TOLERANCE;
                if !range.contains(&u) || !range.contains(&v) {
                    return Err(SamplingError { u, v });
                }
                (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
            }
        };

        // Saturating float-to-int casts map negatives (and NaN) to 0.
        let x = ((u * width as f32) as u32).min(width.saturating_sub(1));
        let y = ((v * height as f32) as u32).min(height.saturating_sub(1));

        Ok(self.image.get(x, y).unwrap_or_default())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn mode(&self) -> SampleMode {
        self.mode
    }
}
