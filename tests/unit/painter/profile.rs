//! Tests for per-generation profile derivation

#[cfg(test)]
mod tests {
    use strokepaint::io::configuration::{Bounds, PaintSettings};
    use strokepaint::painter::profile::derive_profiles;

    fn settings(generations: usize) -> PaintSettings {
        PaintSettings {
            generations,
            ..PaintSettings::for_canvas(100, 100)
        }
    }

    // Tests that a single generation uses the coarse end of every range
    #[test]
    fn test_single_generation() {
        let profiles = derive_profiles(&settings(1));
        assert_eq!(profiles.len(), 1);
        let profile = profiles.first().copied().unwrap();
        assert_eq!(profile.stroke_width, Bounds::new(6, 80));
        assert_eq!(profile.max_length, 50);
        assert!((profile.blur_sigma - 30.0).abs() < 1e-9);
        assert!((profile.stroke_tolerance - 1500.0).abs() < 1e-9);
        assert!((profile.reject_tolerance - 20000.0).abs() < 1e-9);
        assert_eq!(profile.iterations, 1);
    }

    #[test]
    fn test_coarsest_first() {
        let profiles = derive_profiles(&settings(2));
        assert_eq!(profiles.len(), 2);

        let coarse = profiles.first().copied().unwrap();
        assert_eq!(coarse.stroke_width, Bounds::new(43, 80));
        assert_eq!(coarse.max_length, 50);
        assert!((coarse.blur_sigma - 30.0).abs() < 1e-9);

        let fine = profiles.last().copied().unwrap();
        assert_eq!(fine.stroke_width, Bounds::new(6, 43));
        assert_eq!(fine.max_length, 0);
        assert!((fine.blur_sigma - 4.0).abs() < 1e-9);
        assert!((fine.tile_tolerance - 5000.0).abs() < 1e-9);
        assert_eq!(fine.iterations, 10_000 / (43 * 43));
    }

    // Tests that width ranges tile the user range without gaps
    #[test]
    fn test_width_ranges_are_contiguous() {
        let profiles = derive_profiles(&settings(7));
        for pair in profiles.windows(2) {
            if let [coarse, fine] = pair {
                assert_eq!(coarse.stroke_width.min, fine.stroke_width.max);
                assert!(coarse.blur_sigma >= fine.blur_sigma);
            }
        }
        assert_eq!(profiles.last().map(|profile| profile.stroke_width.min), Some(6));
        assert_eq!(profiles.first().map(|profile| profile.stroke_width.max), Some(80));
    }

    #[test]
    fn test_window_and_limits() {
        let profiles = derive_profiles(&settings(1));
        let profile = profiles.first().copied().unwrap();
        assert_eq!(profile.averaging_window(), 160);

        let limits = profile.trace_limits(2, false);
        assert_eq!(limits.min_width, 6);
        assert_eq!(limits.max_width, 80);
        assert_eq!(limits.max_length, 50);
        assert_eq!(limits.max_segments, 2);
        assert!(!limits.validate_turn_angle);
        assert!((limits.tolerance - 1500.0).abs() < 1e-9);
    }
}
