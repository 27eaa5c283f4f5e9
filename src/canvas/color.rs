//! RGB color arithmetic used by tracing and compositing

use crate::canvas::grid::Grid;

/// Opaque 8-bit RGB color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

/// Width × height RGB raster
pub type Canvas = Grid<Rgb>;

impl Rgb {
    /// Pure white, the empty-canvas color
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Blend `front` over `self` with coverage `alpha` in `[0, 1]`
    ///
    /// Channels are truncated toward zero, then clamped.
    pub fn blend(self, front: Self, alpha: f64) -> Self {
        let mix = |back: u8, fore: u8| -> u8 {
            let value = alpha.mul_add(f64::from(fore), (1.0 - alpha) * f64::from(back));
            (value as i64).clamp(0, 255) as u8
        };
        Self::new(
            mix(self.r, front.r),
            mix(self.g, front.g),
            mix(self.b, front.b),
        )
    }

    /// Squared Euclidean distance in RGB space
    pub fn squared_distance(self, other: Self) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        db.mul_add(db, dr.mul_add(dr, dg * dg))
    }

    /// Mean channel value, truncated to an integer
    pub fn brightness(self) -> f64 {
        let sum = u32::from(self.r) + u32::from(self.g) + u32::from(self.b);
        f64::from((sum / 3).min(255))
    }

    /// ITU-R BT.709 luminance, truncated to an integer level
    pub fn luminance(self) -> f64 {
        let value = 0.0722_f64.mul_add(
            f64::from(self.b),
            0.2126_f64.mul_add(f64::from(self.r), 0.7152 * f64::from(self.g)),
        );
        value.clamp(0.0, 255.0).trunc()
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(pixel: image::Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self::new(r, g, b)
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(color: Rgb) -> Self {
        Self(color.channels())
    }
}
