//! Per-pixel edge direction field
//!
//! - Converts the source to BT.709 luminance and blurs it by the
//!   generation's sigma.
//! - Correlates a 3×3 derivative kernel pair (`X`, `Y`) with border clamping.
//! - Smooths both derivatives with a uniform box window so the direction
//!   reflects the neighbourhood rather than single-pixel noise.
//! - Stores `atan2(dy, dx)` per pixel.
//!
//! In constant regions both derivatives vanish and the angle is arbitrary
//! (0); tracing tolerates any angle there.

use crate::canvas::color::Canvas;
use crate::canvas::grid::{Grid, Point};
use crate::io::configuration::SYMMETRIC_KERNEL_COEFFICIENT;
use crate::math::convolution::{box_filter, convolve, gaussian_blur};
use ndarray::{Array2, array};

/// Choice of 3×3 derivative operator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DerivativeKernel {
    /// Classic Sobel pair
    #[default]
    Sobel,
    /// Rotation-balanced kernel with a single free coefficient
    Symmetric,
}

impl DerivativeKernel {
    /// `(X, Y)` kernels; `Y` grows downward like image rows
    pub fn kernels(self) -> (Array2<f64>, Array2<f64>) {
        match self {
            Self::Sobel => (
                array![[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]],
                array![[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]],
            ),
            Self::Symmetric => {
                let p = SYMMETRIC_KERNEL_COEFFICIENT;
                let q = 2.0f64.mul_add(-p, 1.0);
                (
                    array![[-p, 0.0, p], [-q, 0.0, q], [-p, 0.0, p]],
                    array![[-p, -q, -p], [0.0, 0.0, 0.0], [p, q, p]],
                )
            }
        }
    }
}

/// Parameters of one gradient field build
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientOptions {
    /// Gaussian blur sigma applied to the luminance
    pub blur_sigma: f64,
    /// Derivative operator
    pub kernel: DerivativeKernel,
    /// Side of the derivative averaging window (forced odd)
    pub window: usize,
}

/// Read-only grid of edge angles in radians
#[derive(Clone, Debug)]
pub struct GradientField {
    angles: Grid<f64>,
}

impl GradientField {
    /// Build the field for `source`
    pub fn build(source: &Canvas, options: GradientOptions) -> Self {
        let luminance = source.map(|color| color.luminance());
        let blurred = gaussian_blur(&luminance, options.blur_sigma);

        let (kernel_x, kernel_y) = options.kernel.kernels();
        let dx = box_filter(&convolve(&blurred, &kernel_x), options.window);
        let dy = box_filter(&convolve(&blurred, &kernel_y), options.window);

        let angles = Grid::from_fn(source.width(), source.height(), |point| {
            let gx = dx.get(point).copied().unwrap_or(0.0);
            let gy = dy.get(point).copied().unwrap_or(0.0);
            gy.atan2(gx)
        });

        Self { angles }
    }

    /// Wrap precomputed angles
    pub const fn from_angles(angles: Grid<f64>) -> Self {
        Self { angles }
    }

    /// Angle at `point`; 0 outside the field
    pub fn angle(&self, point: Point) -> f64 {
        self.angles.get(point).copied().unwrap_or(0.0)
    }

    /// Underlying angle grid
    pub const fn angles(&self) -> &Grid<f64> {
        &self.angles
    }
}
