//! Tests for angle helpers, point offsets and line rasterization

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};
    use strokepaint::canvas::grid::Point;
    use strokepaint::math::geometry::{
        Rotation, interior_angle, line_points, normal_angle, offset, offset_clamped, offset_f,
        rotate, turn_sign,
    };

    #[test]
    fn test_normal_angle_quarter_turns() {
        assert!((normal_angle(0.0, Rotation::Clockwise) - FRAC_PI_2).abs() < 1e-12);
        assert!((normal_angle(0.0, Rotation::CounterClockwise) + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_offset_truncates() {
        assert_eq!(offset(Point::new(0, 0), 0.0, 3.9), Point::new(3, 0));
        assert_eq!(offset(Point::new(5, 5), FRAC_PI_2, 2.0), Point::new(5, 7));
        let (x, y) = offset_f(Point::new(1, 1), 0.0, 0.5);
        assert!((x - 1.5).abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_offset_clamped_to_canvas() {
        assert_eq!(offset_clamped(Point::new(2, 2), PI, 10.0, 9, 9), Point::new(0, 2));
        assert_eq!(offset_clamped(Point::new(8, 8), 0.0, 10.0, 9, 9), Point::new(9, 8));
    }

    #[test]
    fn test_interior_angle() {
        let straight = interior_angle(Point::new(0, 0), Point::new(5, 0), Point::new(10, 0));
        assert!((straight - PI).abs() < 1e-12);
        let right = interior_angle(Point::new(0, 0), Point::new(5, 0), Point::new(5, 5));
        assert!((right - FRAC_PI_2).abs() < 1e-12);
        let degenerate = interior_angle(Point::new(5, 0), Point::new(5, 0), Point::new(5, 5));
        assert!((degenerate - PI).abs() < 1e-12);
    }

    // Tests that opposite turns have opposite signs
    #[test]
    fn test_turn_sign() {
        let a = Point::new(0, 0);
        let b = Point::new(5, 0);
        assert!(turn_sign(a, b, Point::new(5, 5)) > 0.0);
        assert!(turn_sign(a, b, Point::new(5, -5)) < 0.0);
        assert!(turn_sign(a, b, Point::new(10, 0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rotate_quarter() {
        let (x, y) = rotate(1.0, 0.0, FRAC_PI_2);
        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_line_points_endpoints_and_count() {
        let points = line_points(Point::new(0, 0), Point::new(4, 2));
        assert_eq!(points.first(), Some(&Point::new(0, 0)));
        assert_eq!(points.last(), Some(&Point::new(4, 2)));
        assert_eq!(points.len(), 5);

        let single = line_points(Point::new(3, 3), Point::new(3, 3));
        assert_eq!(single, vec![Point::new(3, 3)]);

        let backwards = line_points(Point::new(2, 5), Point::new(2, 1));
        assert_eq!(backwards.len(), 5);
    }
}
