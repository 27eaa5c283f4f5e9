//! Scalar shape features shared by traced paths and library templates

use std::fmt::{self, Display, Formatter};

/// Feature vector describing the shape of a stroke
///
/// Widths and lengths are in canvas pixels. `angle` is the interior angle
/// (degrees) at the second skeleton point, signed by the bend direction;
/// `fraction` is the first segment's share of the total length in percent.
/// Both are zero for strokes with fewer than three points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StrokeDescriptor {
    /// Skeleton point count (1, 2 or 3)
    pub points: usize,
    /// Stroke width
    pub width: f64,
    /// Total skeleton length
    pub length: f64,
    /// Length divided by width
    pub length_to_width: f64,
    /// Signed interior bend angle in degrees
    pub angle: f64,
    /// First segment's share of the length, in percent
    pub fraction: f64,
}

impl StrokeDescriptor {
    /// Descriptor of a dab: a single point of the given width
    pub const fn dab(width: f64) -> Self {
        Self {
            points: 1,
            width,
            length: 0.0,
            length_to_width: 0.0,
            angle: 0.0,
            fraction: 0.0,
        }
    }

    /// Recompute the length-to-width ratio; zero widths count as one pixel
    pub fn with_ratio(mut self) -> Self {
        self.length_to_width = self.length / self.width.max(1.0);
        self
    }

    /// Whether the bend turns the other way than `other`
    ///
    /// A straight angle of zero has its own sign, so it differs from both
    /// bend directions.
    pub fn is_mirrored_against(&self, other: &Self) -> bool {
        bend_sign(self.angle) != bend_sign(other.angle)
    }
}

fn bend_sign(angle: f64) -> i8 {
    if angle > 0.0 {
        1
    } else if angle < 0.0 {
        -1
    } else {
        0
    }
}

impl Display for StrokeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pt={} w={:.1} l={:.1} l/w={:.2} a={:.1} s={:.1}",
            self.points, self.width, self.length, self.length_to_width, self.angle, self.fraction
        )
    }
}
