//! Kernel convolution with replicate-border sampling
//!
//! All filters read out-of-range samples from the nearest valid pixel, so
//! the output has the same size as the input and no dark frame appears at
//! the borders.

use crate::canvas::grid::{Grid, Point};
use ndarray::Array2;

/// Correlate `input` with a centered 2D kernel (odd dimensions)
pub fn convolve(input: &Grid<f64>, kernel: &Array2<f64>) -> Grid<f64> {
    let half_rows = (kernel.nrows() / 2) as i64;
    let half_cols = (kernel.ncols() / 2) as i64;

    Grid::from_fn(input.width(), input.height(), |point| {
        kernel
            .indexed_iter()
            .map(|((row, col), weight)| {
                let x = i64::from(point.x) + col as i64 - half_cols;
                let y = i64::from(point.y) + row as i64 - half_rows;
                weight * input.get_clamped(x, y).copied().unwrap_or(0.0)
            })
            .sum()
    })
}

/// Correlate every row with a 1D kernel
pub fn convolve_horizontal(input: &Grid<f64>, taps: &[f64]) -> Grid<f64> {
    convolve_axis(input, taps, |point, offset| {
        (i64::from(point.x) + offset, i64::from(point.y))
    })
}

/// Correlate every column with a 1D kernel
pub fn convolve_vertical(input: &Grid<f64>, taps: &[f64]) -> Grid<f64> {
    convolve_axis(input, taps, |point, offset| {
        (i64::from(point.x), i64::from(point.y) + offset)
    })
}

fn convolve_axis(
    input: &Grid<f64>,
    taps: &[f64],
    sample_at: impl Fn(Point, i64) -> (i64, i64),
) -> Grid<f64> {
    let half = (taps.len() / 2) as i64;
    Grid::from_fn(input.width(), input.height(), |point| {
        taps.iter()
            .enumerate()
            .map(|(index, weight)| {
                let (x, y) = sample_at(point, index as i64 - half);
                weight * input.get_clamped(x, y).copied().unwrap_or(0.0)
            })
            .sum()
    })
}

/// Sampled 1D gaussian with `ceil(6σ)` taps, forced odd
///
/// Taps follow the continuous density and are not renormalized.
pub fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let mut size = (6.0 * sigma).ceil().max(1.0) as usize;
    if size % 2 == 0 {
        size += 1;
    }
    let half = (size / 2) as i64;
    let scale = 1.0 / (2.0 * std::f64::consts::PI * sigma * sigma).sqrt();
    (-half..=half)
        .map(|tap| {
            let distance = tap as f64;
            scale * (-(distance * distance) / (2.0 * sigma * sigma)).exp()
        })
        .collect()
}

/// Separable gaussian blur; `sigma <= 0` returns the input unchanged
pub fn gaussian_blur(input: &Grid<f64>, sigma: f64) -> Grid<f64> {
    if sigma <= 0.0 {
        return input.clone();
    }
    let taps = gaussian_kernel(sigma);
    convolve_vertical(&convolve_horizontal(input, &taps), &taps)
}

/// Uniform `size × size` mean filter, `size` forced odd
pub fn box_filter(input: &Grid<f64>, size: usize) -> Grid<f64> {
    let size = if size % 2 == 0 { size + 1 } else { size };
    let taps = vec![1.0 / size as f64; size];
    convolve_vertical(&convolve_horizontal(input, &taps), &taps)
}
