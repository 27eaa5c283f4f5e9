//! Tests for the edge direction field

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;
    use strokepaint::canvas::color::{Canvas, Rgb};
    use strokepaint::canvas::grid::{Grid, Point};
    use strokepaint::trace::gradient::{DerivativeKernel, GradientField, GradientOptions};

    fn options(kernel: DerivativeKernel) -> GradientOptions {
        GradientOptions {
            blur_sigma: 1.0,
            kernel,
            window: 3,
        }
    }

    fn vertical_edge() -> Canvas {
        Canvas::from_fn(20, 20, |point| if point.x < 10 { Rgb::BLACK } else { Rgb::WHITE })
    }

    fn horizontal_edge() -> Canvas {
        Canvas::from_fn(20, 20, |point| if point.y < 10 { Rgb::BLACK } else { Rgb::WHITE })
    }

    // Tests that a dark-to-bright step left to right points along +x
    #[test]
    fn test_vertical_edge_angle() {
        for kernel in [DerivativeKernel::Sobel, DerivativeKernel::Symmetric] {
            let field = GradientField::build(&vertical_edge(), options(kernel));
            assert!(field.angle(Point::new(10, 10)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_horizontal_edge_angle() {
        let field = GradientField::build(&horizontal_edge(), options(DerivativeKernel::Sobel));
        assert!((field.angle(Point::new(10, 10)) - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_constant_canvas_is_zero() {
        let canvas = Canvas::new(8, 8, Rgb::BLACK);
        let field = GradientField::build(&canvas, options(DerivativeKernel::Sobel));
        assert!(field.angles().iter().all(|(_, angle)| angle.abs() < 1e-12));
    }

    #[test]
    fn test_field_matches_source_size() {
        let canvas = Canvas::new(7, 5, Rgb::WHITE);
        let field = GradientField::build(&canvas, options(DerivativeKernel::Sobel));
        assert_eq!(field.angles().width(), 7);
        assert_eq!(field.angles().height(), 5);
        assert!(field.angle(Point::new(50, 50)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_symmetric_kernel_coefficients() {
        let (x, y) = DerivativeKernel::Symmetric.kernels();
        let sum: f64 = x.iter().filter(|value| **value > 0.0).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(x.t(), y);
    }

    #[test]
    fn test_from_angles_wraps_grid() {
        let field = GradientField::from_angles(Grid::new(2, 2, 0.5));
        assert!((field.angle(Point::new(1, 1)) - 0.5).abs() < f64::EPSILON);
    }
}
