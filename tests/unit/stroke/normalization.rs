//! Tests for feature normalization ranges

#[cfg(test)]
mod tests {
    use strokepaint::stroke::descriptor::StrokeDescriptor;
    use strokepaint::stroke::normalization::{Feature, NormalizationRange, Normalizer};

    #[test]
    fn test_range_maps_bounds() {
        let mut range = NormalizationRange::new(10.0);
        range.observe(30.0);
        assert!(range.normalize(10.0).abs() < f64::EPSILON);
        assert!((range.normalize(30.0) - 1.0).abs() < f64::EPSILON);
        assert!((range.normalize(20.0) - 0.5).abs() < f64::EPSILON);
    }

    // Tests clamping of values outside the observed range
    #[test]
    fn test_range_clamps() {
        let mut range = NormalizationRange::new(0.0);
        range.observe(4.0);
        assert!(range.normalize(-10.0).abs() < f64::EPSILON);
        assert!((range.normalize(99.0) - 1.0).abs() < f64::EPSILON);
    }

    // Tests that normalization never decreases across the observed range
    #[test]
    fn test_range_monotonic() {
        let mut range = NormalizationRange::new(-3.5);
        range.observe(41.25);
        let steps = 500;
        let span = range.max() - range.min();
        let mut previous = range.normalize(range.min() - 1.0);
        for step in 0..=steps {
            let value = span.mul_add(f64::from(step) / f64::from(steps), range.min());
            let current = range.normalize(value);
            assert!(current >= previous, "dropped at {value}");
            assert!((0.0..=1.0).contains(&current));
            previous = current;
        }
        assert!(range.normalize(range.max() + 1.0) >= previous);
    }

    #[test]
    fn test_collapsed_range_is_zero() {
        let range = NormalizationRange::new(7.0);
        assert!(range.normalize(7.0).abs() < f64::EPSILON);
        assert!(range.normalize(100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_finite_ignored() {
        let mut range = NormalizationRange::new(1.0);
        range.observe(f64::NAN);
        range.observe(f64::INFINITY);
        assert!((range.min() - 1.0).abs() < f64::EPSILON);
        assert!((range.max() - 1.0).abs() < f64::EPSILON);

        let mut normalizer = Normalizer::new();
        normalizer.observe(Feature::Width, f64::NAN);
        assert!(normalizer.range(Feature::Width).is_none());
    }

    #[test]
    fn test_angle_feature_unsigned() {
        let descriptor = StrokeDescriptor {
            angle: -135.0,
            ..StrokeDescriptor::default()
        };
        assert!((Feature::Angle.value(&descriptor) - 135.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalizer_observes_descriptors() {
        let mut normalizer = Normalizer::new();
        let narrow = StrokeDescriptor {
            width: 10.0,
            length_to_width: 2.0,
            ..StrokeDescriptor::default()
        };
        let wide = StrokeDescriptor {
            width: 30.0,
            length_to_width: 4.0,
            ..StrokeDescriptor::default()
        };
        normalizer.observe_descriptor(&narrow);
        normalizer.observe_descriptor(&wide);

        let sample = StrokeDescriptor {
            width: 20.0,
            length_to_width: 3.0,
            ..StrokeDescriptor::default()
        };
        assert!((normalizer.normalize(Feature::Width, &sample) - 0.5).abs() < 1e-12);
        assert!((normalizer.normalize(Feature::LengthToWidth, &sample) - 0.5).abs() < 1e-12);
        // All observed fractions are zero
        assert!(normalizer.normalize(Feature::Fraction, &sample).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unobserved_feature_is_zero() {
        let normalizer = Normalizer::new();
        let sample = StrokeDescriptor::dab(50.0);
        assert!(normalizer.normalize(Feature::Width, &sample).abs() < f64::EPSILON);
    }
}
