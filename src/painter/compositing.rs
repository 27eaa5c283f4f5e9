//! Error scoring and compositing of stroke instances
//!
//! A stroke is placed with its pivot on the origin. Only paint pixels
//! (alpha below `BLACK_BORDER_MEDIUM`) inside the canvas take part. Each one
//! is either the shaded color or the traced mean blended over the render
//! with coverage `(255 - alpha) / 255`.

use crate::canvas::color::{Canvas, Rgb};
use crate::canvas::grid::Point;
use crate::math::geometry::offset_clamped;
use crate::stroke::instance::StrokeInstance;
use std::collections::HashSet;
use std::f64::consts::PI;

/// Canvas position of a stroke's pivot
///
/// The seed moved half a stroke width backwards along the main angle,
/// clamped to the canvas.
pub fn placement_origin(seed: Point, main_angle: f64, width: usize, canvas: &Canvas) -> Point {
    offset_clamped(
        seed,
        main_angle + PI,
        (width / 2) as f64,
        canvas.width() as i32 - 1,
        canvas.height() as i32 - 1,
    )
}

/// Stroke instance positioned on a canvas
#[derive(Clone, Copy, Debug)]
pub struct Placement<'a> {
    /// Oriented stroke
    pub instance: &'a StrokeInstance,
    /// Canvas position of the pivot
    pub origin: Point,
    /// Traced mean color
    pub color: Rgb,
}

impl Placement<'_> {
    /// `(canvas point, local point, alpha)` of every paint pixel
    ///
    /// Canvas points may lie outside the canvas.
    pub fn pixels(&self) -> impl Iterator<Item = (Point, Point, u8)> + '_ {
        let pivot = self.instance.pivot();
        let (dx, dy) = (self.origin.x - pivot.x, self.origin.y - pivot.y);
        self.instance
            .paint_pixels()
            .map(move |(local, alpha)| (local.offset(dx, dy), local, alpha))
    }

    /// Color the stroke leaves over `under`
    pub fn painted_color(&self, local: Point, alpha: u8, under: Rgb) -> Rgb {
        if let Some(&shaded) = self.instance.shaded().and_then(|shaded| shaded.get(local)) {
            return shaded;
        }
        let coverage = (255.0 - f64::from(alpha)) / 255.0;
        under.blend(self.color, coverage)
    }
}

/// Root-mean-square color distance to `source` if `placement` were painted
///
/// The denominator is at least one so a stroke with no visible pixel scores
/// zero.
pub fn reconstruction_error(source: &Canvas, render: &Canvas, placement: &Placement<'_>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0_usize;

    for (point, local, alpha) in placement.pixels() {
        let (Some(&under), Some(&target)) = (render.get(point), source.get(point)) else {
            continue;
        };
        sum += placement
            .painted_color(local, alpha, under)
            .squared_distance(target);
        count += 1;
    }

    (sum / count.max(1) as f64).sqrt()
}

/// Paint `placement` onto `render`; returns the canvas points painted
pub fn composite(render: &mut Canvas, placement: &Placement<'_>) -> Vec<Point> {
    let mut painted = Vec::new();
    for (point, local, alpha) in placement.pixels() {
        if let Some(cell) = render.get_mut(point) {
            *cell = placement.painted_color(local, alpha, *cell);
            painted.push(point);
        }
    }
    painted
}

/// Flat-fill `points` of the model canvas with `color`
pub fn fill_model(model: &mut Canvas, points: &HashSet<Point>, color: Rgb) {
    for &point in points {
        model.set(point, color);
    }
}
