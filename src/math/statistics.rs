//! Mean-color accumulation and the color spread statistic

use crate::canvas::color::{Canvas, Rgb};
use crate::canvas::grid::Point;

/// Running per-channel sums for an incremental mean color
///
/// Accumulators are plain values: copy one to branch a candidate and merge
/// two to combine disjoint pixel sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeanColor {
    red: u64,
    green: u64,
    blue: u64,
    count: u64,
}

impl MeanColor {
    /// Empty accumulator
    pub const fn new() -> Self {
        Self {
            red: 0,
            green: 0,
            blue: 0,
            count: 0,
        }
    }

    /// Accumulate the canvas colors at `points`; points outside are ignored
    pub fn from_points<'a>(canvas: &Canvas, points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut accumulator = Self::new();
        for point in points {
            if let Some(&color) = canvas.get(*point) {
                accumulator.add(color);
            }
        }
        accumulator
    }

    /// Add one sample
    pub fn add(&mut self, color: Rgb) {
        self.red += u64::from(color.r);
        self.green += u64::from(color.g);
        self.blue += u64::from(color.b);
        self.count += 1;
    }

    /// Fold another accumulator into this one
    pub const fn merge(&mut self, other: &Self) {
        self.red += other.red;
        self.green += other.green;
        self.blue += other.blue;
        self.count += other.count;
    }

    /// Number of samples
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Integer mean color, `None` before any sample
    pub fn mean(&self) -> Option<Rgb> {
        if self.count == 0 {
            return None;
        }
        let channel = |sum: u64| (sum / self.count).min(255) as u8;
        Some(Rgb::new(
            channel(self.red),
            channel(self.green),
            channel(self.blue),
        ))
    }
}

/// Spread of canvas colors around `mean`
///
/// `sqrt(max(sum / count - 1, 0))` over squared RGB distances. A uniform set,
/// or one with no pixel inside the canvas, returns 0.
pub fn color_variance<'a>(
    canvas: &Canvas,
    mean: Rgb,
    points: impl IntoIterator<Item = &'a Point>,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0_u64;
    for point in points {
        if let Some(&color) = canvas.get(*point) {
            sum += color.squared_distance(mean);
            count += 1;
        }
    }
    if count == 0 {
        return 0.0;
    }
    (sum / count as f64 - 1.0).max(0.0).sqrt()
}
