//! RGBA colors and intensity modulation.

/// An 8-bit-per-channel RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const RED: Color = Color::rgb(255, 0, 0);

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Multiply R, G and B by `intensity`, leaving alpha untouched.
    ///
    /// Each channel is clamped into `[0, 255]`, so negative intensities
    /// (surfaces facing away from the light) come out black.
    #[inline]
    pub fn scale(self, intensity: f32) -> Self {
        #[inline]
        fn channel(c: u8, intensity: f32) -> u8 {
            (c as f32 * intensity).clamp(0.0, 255.0) as u8
        }

        Self {
            r: channel(self.r, intensity),
            g: channel(self.g, intensity),
            b: channel(self.b, intensity),
            a: self.a,
        }
    }

    pub const fn from_rgba([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}
