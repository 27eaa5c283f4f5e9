//! Tests for the mean-color accumulator and color spread

#[cfg(test)]
mod tests {
    use strokepaint::canvas::color::{Canvas, Rgb};
    use strokepaint::canvas::grid::Point;
    use strokepaint::math::statistics::{MeanColor, color_variance};

    #[test]
    fn test_empty_accumulator_has_no_mean() {
        let accumulator = MeanColor::new();
        assert_eq!(accumulator.count(), 0);
        assert!(accumulator.mean().is_none());
    }

    #[test]
    fn test_mean_truncates() {
        let mut accumulator = MeanColor::new();
        accumulator.add(Rgb::new(0, 10, 255));
        accumulator.add(Rgb::new(1, 11, 254));
        assert_eq!(accumulator.mean(), Some(Rgb::new(0, 10, 254)));
    }

    // Tests that merging equals accumulating the union
    #[test]
    fn test_merge_matches_union() {
        let mut left = MeanColor::new();
        left.add(Rgb::new(100, 0, 0));
        let mut right = MeanColor::new();
        right.add(Rgb::new(0, 100, 0));
        right.add(Rgb::new(0, 0, 100));

        let mut union = MeanColor::new();
        for color in [Rgb::new(100, 0, 0), Rgb::new(0, 100, 0), Rgb::new(0, 0, 100)] {
            union.add(color);
        }

        left.merge(&right);
        assert_eq!(left, union);
        assert_eq!(left.count(), 3);
    }

    #[test]
    fn test_from_points_ignores_outside() {
        let canvas = Canvas::new(2, 2, Rgb::new(9, 9, 9));
        let points = [Point::new(0, 0), Point::new(5, 5), Point::new(-1, 0)];
        let accumulator = MeanColor::from_points(&canvas, &points);
        assert_eq!(accumulator.count(), 1);
    }

    #[test]
    fn test_variance_uniform_is_zero() {
        let canvas = Canvas::new(3, 3, Rgb::new(40, 50, 60));
        let points: Vec<Point> = canvas.points().collect();
        assert!(color_variance(&canvas, Rgb::new(40, 50, 60), &points).abs() < f64::EPSILON);
    }

    // Tests the square root of the mean squared distance less one
    #[test]
    fn test_variance_scale() {
        let mut canvas = Canvas::new(2, 1, Rgb::BLACK);
        canvas.set(Point::new(1, 0), Rgb::new(10, 0, 0));
        let points = [Point::new(0, 0), Point::new(1, 0)];
        // Distances to (5, 0, 0) are 25 each, so sqrt(50 / 2 - 1)
        let variance = color_variance(&canvas, Rgb::new(5, 0, 0), &points);
        assert!((variance - 24.0_f64.sqrt()).abs() < 1e-9);
    }

    // Tests that spreads below one unit per pixel clamp to zero
    #[test]
    fn test_variance_small_spread_clamps() {
        let mut canvas = Canvas::new(4, 1, Rgb::new(10, 10, 10));
        canvas.set(Point::new(0, 0), Rgb::new(11, 10, 10));
        let points: Vec<Point> = canvas.points().collect();
        assert!(color_variance(&canvas, Rgb::new(10, 10, 10), &points).abs() < f64::EPSILON);
    }

    #[test]
    fn test_variance_single_pixel_is_zero() {
        let canvas = Canvas::new(1, 1, Rgb::new(200, 0, 0));
        let points = [Point::new(0, 0)];
        let mean = MeanColor::from_points(&canvas, &points).mean().unwrap();
        assert!(color_variance(&canvas, mean, &points).abs() < f64::EPSILON);
        assert!(color_variance(&canvas, mean, &[Point::new(3, 3)]).abs() < f64::EPSILON);
    }

    // Tests that permuting the channels of every pixel keeps the spread
    #[test]
    fn test_variance_channel_permutation_invariant() {
        let palette = [
            Rgb::new(12, 200, 90),
            Rgb::new(250, 3, 41),
            Rgb::new(77, 77, 160),
            Rgb::new(0, 128, 255),
        ];
        let mut shades = palette.iter().cycle();
        let canvas = Canvas::from_fn(4, 3, |_| shades.next().copied().unwrap());
        let rotated = canvas.map(|color| Rgb::new(color.b, color.r, color.g));
        let points: Vec<Point> = canvas.points().collect();

        let spread = |canvas: &Canvas| {
            let mean = MeanColor::from_points(canvas, &points).mean().unwrap();
            color_variance(canvas, mean, &points)
        };
        let original = spread(&canvas);
        assert!(original > 0.0);
        assert!((original - spread(&rotated)).abs() < 1e-9);
    }

    // Tests that merge order does not change the mean
    #[test]
    fn test_merge_commutes() {
        let mut first = MeanColor::new();
        first.add(Rgb::new(200, 10, 33));
        first.add(Rgb::new(17, 90, 250));
        let mut second = MeanColor::new();
        second.add(Rgb::new(5, 5, 5));

        let mut forward = first;
        forward.merge(&second);
        let mut backward = second;
        backward.merge(&first);

        assert_eq!(forward.mean(), backward.mean());
        assert_eq!(forward, backward);
        assert_eq!(forward.count(), 3);
    }
}
