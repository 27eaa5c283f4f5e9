//! Tests for replicate-border convolution and blur filters

#[cfg(test)]
mod tests {
    use ndarray::array;
    use strokepaint::canvas::grid::{Grid, Point};
    use strokepaint::math::convolution::{box_filter, convolve, gaussian_blur, gaussian_kernel};

    fn ramp() -> Grid<f64> {
        Grid::from_fn(5, 5, |point| f64::from(point.x))
    }

    // Tests that a constant image stays constant at the borders
    #[test]
    fn test_constant_image_preserved() {
        let grid = Grid::new(4, 4, 3.0);
        let filtered = box_filter(&grid, 3);
        assert!(filtered.iter().all(|(_, &value)| (value - 3.0).abs() < 1e-9));
    }

    #[test]
    fn test_convolve_horizontal_difference() {
        let kernel = array![[0.0, 0.0, 0.0], [-1.0, 0.0, 1.0], [0.0, 0.0, 0.0]];
        let result = convolve(&ramp(), &kernel);
        // Interior slope is 2 over the three taps
        assert!((result.get(Point::new(2, 2)).copied().unwrap_or_default() - 2.0).abs() < 1e-9);
        // Left border replicates column 0
        assert!((result.get(Point::new(0, 2)).copied().unwrap_or_default() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_gaussian_kernel_shape() {
        let taps = gaussian_kernel(1.0);
        assert_eq!(taps.len(), 7);
        assert!(taps.len() % 2 == 1);
        let center = taps.get(3).copied().unwrap_or_default();
        assert!(taps.iter().all(|&tap| tap <= center));
        assert!((taps.first().copied().unwrap_or_default() - taps.last().copied().unwrap_or_default()).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_kernel_even_size_forced_odd() {
        // ceil(6 * 2) = 12 taps, bumped to 13
        assert_eq!(gaussian_kernel(2.0).len(), 13);
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        let grid = ramp();
        assert_eq!(gaussian_blur(&grid, 0.0), grid);
    }

    #[test]
    fn test_blur_smooths_step() {
        let step = Grid::from_fn(9, 1, |point| if point.x < 4 { 0.0 } else { 100.0 });
        let blurred = gaussian_blur(&step, 1.0);
        let at = |x| blurred.get(Point::new(x, 0)).copied().unwrap_or_default();
        assert!(at(3) > 0.0);
        assert!(at(4) < 100.0);
        assert!(at(3) < at(4));
    }

    #[test]
    fn test_box_filter_even_size_forced_odd() {
        let mut grid = Grid::new(5, 5, 0.0);
        grid.set(Point::new(2, 2), 9.0);
        let filtered = box_filter(&grid, 2);
        // Size 3: the impulse spreads to its 3x3 neighbourhood
        assert!((filtered.get(Point::new(1, 1)).copied().unwrap_or_default() - 1.0).abs() < 1e-9);
        assert!(filtered.get(Point::new(0, 0)).copied().unwrap_or_default().abs() < 1e-9);
    }
}
