//! Tests for run settings, validation and algorithm options

#[cfg(test)]
mod tests {
    use strokepaint::PainterError;
    use strokepaint::io::configuration::{
        Bounds, DEFAULT_GENERATIONS, DEFAULT_STROKE_WIDTH, MAX_CANVAS_DIMENSION, PaintSettings,
        PainterOptions,
    };
    use strokepaint::stroke::instance::ResizeMode;
    use strokepaint::trace::gradient::DerivativeKernel;

    fn invalid_name(settings: &PaintSettings) -> Option<&'static str> {
        match settings.validate() {
            Err(PainterError::InvalidParameter { parameter, .. }) => Some(parameter),
            _ => None,
        }
    }

    #[test]
    fn test_defaults() {
        let settings = PaintSettings::for_canvas(64, 32);
        assert_eq!((settings.width, settings.height), (64, 32));
        assert_eq!(settings.generations, DEFAULT_GENERATIONS);
        assert_eq!(settings.stroke_width, Bounds::from(DEFAULT_STROKE_WIDTH));
        assert!(settings.validate().is_ok());

        let options = PainterOptions::default();
        assert_eq!(options.kernel, DerivativeKernel::Sobel);
        assert_eq!(options.resize_mode, ResizeMode::Width);
        assert!(options.shading);
        assert!(options.validate_turn_angle);
        assert!(!options.track_occupancy);
        assert_eq!(options.seed, None);
    }

    // Tests that each invalid field is reported by name
    #[test]
    fn test_validation_errors() {
        let base = PaintSettings::for_canvas(64, 64);

        assert_eq!(invalid_name(&PaintSettings { width: 0, ..base.clone() }), Some("width"));
        assert_eq!(
            invalid_name(&PaintSettings {
                height: MAX_CANVAS_DIMENSION + 1,
                ..base.clone()
            }),
            Some("height")
        );
        assert_eq!(
            invalid_name(&PaintSettings { generations: 0, ..base.clone() }),
            Some("generations")
        );
        assert_eq!(
            invalid_name(&PaintSettings {
                max_stroke_segments: 3,
                ..base.clone()
            }),
            Some("max_stroke_segments")
        );
        assert_eq!(
            invalid_name(&PaintSettings {
                stroke_width: Bounds::new(10, 5),
                ..base.clone()
            }),
            Some("stroke_width")
        );
        assert_eq!(
            invalid_name(&PaintSettings {
                stroke_width: Bounds::new(0, 0),
                ..base.clone()
            }),
            Some("stroke_width")
        );
        assert_eq!(
            invalid_name(&PaintSettings {
                blur_sigma: Bounds::new(-1.0, 4.0),
                ..base.clone()
            }),
            Some("blur_sigma")
        );
        assert_eq!(
            invalid_name(&PaintSettings {
                reject_tolerance: Bounds::new(0.0, f64::NAN),
                ..base
            }),
            Some("reject_tolerance")
        );
    }

    #[test]
    fn test_single_segment_is_valid() {
        let settings = PaintSettings {
            max_stroke_segments: 1,
            stroke_length: Bounds::new(0, 0),
            ..PaintSettings::for_canvas(10, 10)
        };
        assert!(settings.validate().is_ok());
    }
}
