//! Tests for stroke descriptors

#[cfg(test)]
mod tests {
    use strokepaint::stroke::descriptor::StrokeDescriptor;

    #[test]
    fn test_dab_descriptor() {
        let dab = StrokeDescriptor::dab(12.0);
        assert_eq!(dab.points, 1);
        assert!((dab.width - 12.0).abs() < f64::EPSILON);
        assert!(dab.length.abs() < f64::EPSILON);
        assert!(dab.angle.abs() < f64::EPSILON);
    }

    #[test]
    fn test_ratio_recomputed() {
        let descriptor = StrokeDescriptor {
            points: 2,
            width: 8.0,
            length: 24.0,
            ..StrokeDescriptor::default()
        }
        .with_ratio();
        assert!((descriptor.length_to_width - 3.0).abs() < f64::EPSILON);
    }

    // Tests that a zero width does not divide by zero
    #[test]
    fn test_ratio_zero_width() {
        let descriptor = StrokeDescriptor {
            length: 5.0,
            ..StrokeDescriptor::default()
        }
        .with_ratio();
        assert!((descriptor.length_to_width - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mirroring_by_sign() {
        let left = StrokeDescriptor {
            angle: -120.0,
            ..StrokeDescriptor::default()
        };
        let right = StrokeDescriptor {
            angle: 120.0,
            ..StrokeDescriptor::default()
        };
        assert!(left.is_mirrored_against(&right));
        assert!(!right.is_mirrored_against(&right));
    }

    // Tests that a zero angle counts as a sign of its own
    #[test]
    fn test_zero_angle_mirrors_both_bends() {
        let straight = StrokeDescriptor::default();
        let left = StrokeDescriptor {
            angle: -120.0,
            ..StrokeDescriptor::default()
        };
        let right = StrokeDescriptor {
            angle: 120.0,
            ..StrokeDescriptor::default()
        };
        assert!(straight.is_mirrored_against(&right));
        assert!(straight.is_mirrored_against(&left));
        assert!(right.is_mirrored_against(&straight));
        assert!(!straight.is_mirrored_against(&straight));
    }

    #[test]
    fn test_display_lists_features() {
        let text = StrokeDescriptor::dab(4.0).to_string();
        assert!(text.starts_with("pt=1 w=4.0"));
    }
}
