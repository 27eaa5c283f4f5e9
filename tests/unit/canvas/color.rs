//! Tests for RGB blending, distances and conversions

#[cfg(test)]
mod tests {
    use strokepaint::canvas::color::Rgb;

    #[test]
    fn test_blend_extremes() {
        let back = Rgb::new(10, 20, 30);
        let front = Rgb::new(200, 100, 0);
        assert_eq!(back.blend(front, 0.0), back);
        assert_eq!(back.blend(front, 1.0), front);
    }

    // Tests truncation of blended channels
    #[test]
    fn test_blend_half_truncates() {
        let blended = Rgb::WHITE.blend(Rgb::BLACK, 0.5);
        assert_eq!(blended, Rgb::new(127, 127, 127));
    }

    #[test]
    fn test_squared_distance() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(3, 4, 0);
        assert!((a.squared_distance(b) - 25.0).abs() < f64::EPSILON);
        assert!(a.squared_distance(a).abs() < f64::EPSILON);
    }

    #[test]
    fn test_brightness_truncates_mean() {
        assert!((Rgb::new(255, 255, 254).brightness() - 254.0).abs() < f64::EPSILON);
        assert!((Rgb::WHITE.brightness() - 255.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_luminance_weights() {
        // Truncated on purpose: the weighted sum for white can land just under 255
        let white = Rgb::WHITE.luminance();
        assert!((254.0..=255.0).contains(&white));
        assert!((white - white.trunc()).abs() < f64::EPSILON);
        assert!(Rgb::new(0, 0, 255).luminance() >= 18.0);
        assert!(Rgb::BLACK.luminance().abs() < f64::EPSILON);
        // Green dominates the weighting
        assert!(Rgb::new(0, 255, 0).luminance() > Rgb::new(255, 0, 0).luminance());
    }

    #[test]
    fn test_image_pixel_conversion() {
        let color = Rgb::new(1, 2, 3);
        let pixel: image::Rgb<u8> = color.into();
        assert_eq!(pixel.0, [1, 2, 3]);
        assert_eq!(Rgb::from(pixel), color);
    }
}
