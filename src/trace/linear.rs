//! Straight segment search along a fixed direction
//!
//! Every candidate length is measured independently against the pixels and
//! accumulator inherited from the stroke's earlier segments. The inherited
//! state is only read; each candidate works on its own copy.

use crate::canvas::color::Canvas;
use crate::canvas::grid::Point;
use crate::math::geometry::offset_clamped;
use crate::math::statistics::{MeanColor, color_variance};
use crate::trace::disk::DiskMasks;
use crate::trace::rectangle::OrientedRectangle;
use rayon::prelude::*;
use std::collections::HashSet;

/// State carried over from the segments already committed to a stroke
#[derive(Clone, Copy, Debug)]
pub struct Inherited<'a> {
    /// Pixels covered so far
    pub points: &'a HashSet<Point>,
    /// Mean-color accumulator over `points`
    pub mean: MeanColor,
}

/// One measured segment length
#[derive(Clone, Debug)]
pub struct SegmentCandidate {
    /// Requested length in pixels
    pub length: usize,
    /// Segment start
    pub start: Point,
    /// Segment end, clamped to the canvas
    pub end: Point,
    /// Pixels added by this segment (disjoint from the inherited set)
    pub points: HashSet<Point>,
    /// Accumulator over inherited and new pixels
    pub mean: MeanColor,
    /// Color spread over inherited and new pixels
    pub variance: f64,
}

/// Measure the segment `start → end` of the given width
///
/// Covers the strict interior of the oriented rectangle plus a disk of
/// radius `width / 2` at each end.
pub fn measure_segment(
    canvas: &Canvas,
    masks: &DiskMasks,
    start: Point,
    end: Point,
    width: usize,
    length: usize,
    inherited: Inherited<'_>,
) -> SegmentCandidate {
    let mut points = HashSet::new();
    let mut mean = inherited.mean;

    let mut include = |point: Point| {
        if let Some(&color) = canvas.get(point)
            && !inherited.points.contains(&point)
            && points.insert(point)
        {
            mean.add(color);
        }
    };

    OrientedRectangle::new(start, end, width)
        .interior_points()
        .for_each(&mut include);

    let cap = masks.get(width / 2);
    for center in [start, end] {
        cap.points_in(canvas, center).into_iter().for_each(&mut include);
    }

    let variance = mean.mean().map_or(0.0, |color| {
        color_variance(canvas, color, points.iter().chain(inherited.points))
    });

    SegmentCandidate {
        length,
        start,
        end,
        points,
        mean,
        variance,
    }
}

/// Measure every length in `1..=max_length` along `angle` in parallel
///
/// Candidates are returned ordered by length.
pub fn trace_segments(
    canvas: &Canvas,
    masks: &DiskMasks,
    start: Point,
    angle: f64,
    width: usize,
    max_length: usize,
    inherited: Inherited<'_>,
) -> Vec<SegmentCandidate> {
    let max_x = canvas.width() as i32 - 1;
    let max_y = canvas.height() as i32 - 1;

    (1..=max_length)
        .into_par_iter()
        .map(|length| {
            let end = offset_clamped(start, angle, length as f64, max_x, max_y);
            measure_segment(canvas, masks, start, end, width, length, inherited)
        })
        .collect()
}

/// Longest candidate whose spread is within `tolerance`
pub fn longest_within(candidates: Vec<SegmentCandidate>, tolerance: f64) -> Option<SegmentCandidate> {
    candidates
        .into_iter()
        .rev()
        .find(|candidate| candidate.variance <= tolerance)
}
