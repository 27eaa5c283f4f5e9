//! Per-generation parameter profiles
//!
//! Each user bound pair is interpolated by a generation factor. Stroke
//! widths use consecutive split factors `g / N` and `(g + 1) / N`, so the
//! generations tile the width range; every other field uses `g / (N - 1)`.
//! Factors are rounded to three decimals and integer fields truncated. The
//! list is built fine-to-coarse and reversed, so profile 0 is the coarsest.

use crate::io::configuration::{Bounds, PaintSettings};
use crate::trace::path::TraceLimits;

/// Parameters of one painting generation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationProfile {
    /// Stroke width range tried by the circle search
    pub stroke_width: Bounds<usize>,
    /// Longest segment tried
    pub max_length: usize,
    /// Gaussian blur sigma for the gradient field
    pub blur_sigma: f64,
    /// Color spread a stroke may accumulate
    pub stroke_tolerance: f64,
    /// Color spread of a flat region
    pub tile_tolerance: f64,
    /// Reconstruction error above which a placement is discarded
    pub reject_tolerance: f64,
    /// Placement attempts for generations after the first
    pub iterations: usize,
}

impl GenerationProfile {
    /// Side of the gradient averaging window
    pub const fn averaging_window(&self) -> usize {
        2 * self.stroke_width.max
    }

    /// Tracing limits for this generation
    pub const fn trace_limits(&self, max_segments: usize, validate_turn_angle: bool) -> TraceLimits {
        TraceLimits {
            min_width: self.stroke_width.min,
            max_width: self.stroke_width.max,
            max_length: self.max_length,
            tolerance: self.stroke_tolerance,
            max_segments,
            validate_turn_angle,
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn lerp(bounds: Bounds<f64>, factor: f64) -> f64 {
    (bounds.max - bounds.min).mul_add(factor, bounds.min)
}

fn lerp_int(bounds: Bounds<u32>, factor: f64) -> usize {
    let interval = f64::from(bounds.max) - f64::from(bounds.min);
    interval.mul_add(factor, f64::from(bounds.min)).max(0.0) as usize
}

/// Derive every generation's profile, coarsest first
///
/// A single generation takes the coarse end (`factor = 1`) of every
/// interpolated field.
pub fn derive_profiles(settings: &PaintSettings) -> Vec<GenerationProfile> {
    let count = settings.generations;
    let area = settings.width as usize * settings.height as usize;

    let mut profiles: Vec<GenerationProfile> = (0..count)
        .map(|generation| {
            let down = round3(generation as f64 / count as f64);
            let up = round3((generation + 1) as f64 / count as f64);
            let normal = if count > 1 {
                round3(generation as f64 / (count - 1) as f64)
            } else {
                1.0
            };

            let stroke_width = Bounds::new(
                lerp_int(settings.stroke_width, down),
                lerp_int(settings.stroke_width, up),
            );
            let iterations = area / (stroke_width.max * stroke_width.max).max(1);

            GenerationProfile {
                stroke_width,
                max_length: lerp_int(settings.stroke_length, normal),
                blur_sigma: lerp(settings.blur_sigma, normal),
                stroke_tolerance: lerp(settings.stroke_tolerance, normal),
                tile_tolerance: lerp(settings.tile_tolerance, normal),
                reject_tolerance: lerp(settings.reject_tolerance, normal),
                iterations,
            }
        })
        .collect();

    profiles.reverse();
    profiles
}
