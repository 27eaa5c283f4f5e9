//! Tests for normal unpacking and Phong shading

#[cfg(test)]
mod tests {
    use strokepaint::canvas::color::{Canvas, Rgb};
    use strokepaint::canvas::grid::{Grid, Point};
    use strokepaint::stroke::shading::{PhongParameters, shade, unpack_normal};

    #[test]
    fn test_unpack_normal_extremes() {
        let up = unpack_normal(Rgb::new(255, 255, 0));
        assert!((up.x - 1.0).abs() < 1e-12);
        assert!((up.y - 1.0).abs() < 1e-12);
        assert!((up.z - 1.0).abs() < 1e-12);

        let flat = unpack_normal(Rgb::new(0, 0, 128));
        assert!((flat.x + 1.0).abs() < 1e-12);
        assert!(flat.z.abs() < 1e-12);
    }

    #[test]
    fn test_default_parameters() {
        let parameters = PhongParameters::for_color(Rgb::new(1, 2, 3));
        assert_eq!(parameters.shininess, 40);
        assert_eq!(parameters.light_color, Rgb::new(1, 2, 3));
        assert_eq!(parameters.specular_color, Rgb::WHITE);
        assert!((parameters.observer_direction.z + 1.0).abs() < f64::EPSILON);
    }

    // Tests that background texture pixels come out white
    #[test]
    fn test_background_is_white() {
        let texture = Grid::new(3, 3, 250_u8);
        let normal_map = Canvas::new(3, 3, Rgb::new(128, 128, 255));
        let shaded = shade(&texture, &normal_map, &PhongParameters::for_color(Rgb::BLACK));
        assert!(shaded.iter().all(|(_, &color)| color == Rgb::WHITE));
    }

    #[test]
    fn test_facing_normal_adds_highlight() {
        let texture = Grid::new(2, 2, 0_u8);
        // Pixels outside the map face the observer
        let normal_map = Canvas::new(0, 0, Rgb::BLACK);
        let shaded = shade(&texture, &normal_map, &PhongParameters::for_color(Rgb::BLACK));
        let color = shaded.get(Point::new(1, 1)).copied().unwrap_or_default();
        assert!(color.r > 0 && color.r < 255);
        assert_eq!(color.r, color.g);
        assert_eq!(color.g, color.b);
    }

    #[test]
    fn test_shading_keeps_paint_hue() {
        let texture = Grid::new(1, 1, 0_u8);
        let normal_map = Canvas::new(1, 1, Rgb::new(128, 128, 255));
        let paint = Rgb::new(200, 100, 50);
        let shaded = shade(&texture, &normal_map, &PhongParameters::for_color(paint));
        let color = shaded.get(Point::new(0, 0)).copied().unwrap_or_default();
        assert!(color.r > color.g && color.g > color.b);
    }
}
