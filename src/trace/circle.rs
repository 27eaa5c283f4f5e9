//! Circular region search that fixes a stroke's initial width

use crate::canvas::color::Canvas;
use crate::canvas::grid::Point;
use crate::math::statistics::{MeanColor, color_variance};
use crate::trace::disk::DiskMasks;
use rayon::prelude::*;
use std::collections::HashSet;

/// Disk neighbourhood around a seed with its color statistics
#[derive(Clone, Debug)]
pub struct CircleRegion {
    /// Seed point
    pub center: Point,
    /// Disk radius in pixels
    pub radius: usize,
    /// In-bounds pixels of the disk
    pub points: HashSet<Point>,
    /// Mean-color accumulator over `points`
    pub mean: MeanColor,
    /// Color spread over `points`
    pub variance: f64,
}

impl CircleRegion {
    /// Stroke width implied by the disk
    pub const fn width(&self) -> usize {
        2 * self.radius
    }
}

/// Measure the disk of `radius` centered at `center`
pub fn measure_disk(canvas: &Canvas, masks: &DiskMasks, center: Point, radius: usize) -> CircleRegion {
    let points: HashSet<Point> = masks
        .get(radius)
        .points_in(canvas, center)
        .into_iter()
        .collect();
    let mean = MeanColor::from_points(canvas, &points);
    let variance = mean
        .mean()
        .map_or(0.0, |color| color_variance(canvas, color, &points));

    CircleRegion {
        center,
        radius,
        points,
        mean,
        variance,
    }
}

/// Smallest disk in `min_radius..=max_radius` whose spread is within `tolerance`
///
/// Every radius is measured in parallel. When none qualifies the smallest
/// radius tried is returned.
pub fn trace_circle(
    canvas: &Canvas,
    masks: &DiskMasks,
    center: Point,
    min_radius: usize,
    max_radius: usize,
    tolerance: f64,
) -> CircleRegion {
    let max_radius = max_radius.max(min_radius);
    let mut regions: Vec<CircleRegion> = (min_radius..=max_radius)
        .into_par_iter()
        .map(|radius| measure_disk(canvas, masks, center, radius))
        .collect();

    let chosen = regions
        .iter()
        .position(|region| region.variance <= tolerance)
        .unwrap_or(0);
    regions.swap_remove(chosen)
}
