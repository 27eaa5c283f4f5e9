//! Algorithm constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};
use crate::stroke::instance::ResizeMode;
use crate::trace::gradient::DerivativeKernel;

// Physical stroke units in the library are millimetres
/// Millimetre to pixel scale for library descriptors
pub const MM_TO_PX: f64 = 8.6;

// Stroke textures store alpha as gray: 0 = opaque paint, 255 = background
/// Texture values below this are treated as paint when compositing and cropping
pub const BLACK_BORDER_MEDIUM: u8 = 200;
/// Texture values below this receive shading
pub const BLACK_BORDER_STRONG: u8 = 240;

/// Background value of every channel of an unshaded normal map
pub const NORMAL_MAP_BACKGROUND: u8 = 128;
/// Suffix appended to a stroke file stem to name its normal map
pub const NORMAL_MAP_SUFFIX: &str = "n";

/// Row of a template texture scanned for the pivot point
pub const PIVOT_ROW: usize = 3;

/// Remaining seed fraction at which the first generation stops
pub const FIRST_LAYER_FILL: f64 = 0.01;

/// Turns at or above this interior angle (radians) end a path
pub const TURN_ANGLE_LIMIT: f64 = 2.8;
/// Probe distance used to pick the continuation direction of a path
pub const CONTINUATION_PROBE: f64 = 10.0;
/// Exclusive bounds (percent) for the first segment's share of a bent stroke
pub const FRACTION_BOUNDS: (f64, f64) = (10.0, 90.0);

/// Weight of the width feature in normalized template distances
pub const WIDTH_FEATURE_WEIGHT: f64 = 0.33;

/// Mean brightness above which a stroke is shaded
pub const SHADING_BRIGHTNESS: f64 = 200.0;

/// Coefficient of the symmetric derivative kernel
pub const SYMMETRIC_KERNEL_COEFFICIENT: f64 = 0.183;

/// Visible fraction below which a stroke is dropped from the occupancy map
pub const VISIBILITY_FRACTION: f64 = 0.03;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed canvas dimension
pub const MAX_CANVAS_DIMENSION: u32 = 10_000;

/// Highest skeleton point count the stroke library can represent
pub const MAX_STROKE_POINTS: usize = 3;

// Output settings
/// Suffix of the rendered canvas file
pub const RENDER_SUFFIX: &str = "_render";
/// Suffix of the flat model canvas file
pub const MODEL_SUFFIX: &str = "_model";
/// Suffix of the stroke boundary canvas file
pub const SHAPES_SUFFIX: &str = "_shapes";
/// Suffix of the stroke skeleton canvas file
pub const SKELETON_SUFFIX: &str = "_skeleton";

/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Default values for configurable parameters
/// Number of coarse-to-fine generations
pub const DEFAULT_GENERATIONS: usize = 7;
/// Segments per stroke
pub const DEFAULT_MAX_STROKE_SEGMENTS: usize = 2;
/// Stroke width bounds in pixels
pub const DEFAULT_STROKE_WIDTH: (u32, u32) = (6, 80);
/// Stroke length bounds in pixels
pub const DEFAULT_STROKE_LENGTH: (u32, u32) = (0, 50);
/// Blur sigma bounds
pub const DEFAULT_BLUR_SIGMA: (f64, f64) = (4.0, 30.0);
/// Stroke variance tolerance bounds
pub const DEFAULT_STROKE_TOLERANCE: (f64, f64) = (340.0, 1500.0);
/// Tile variance tolerance bounds
pub const DEFAULT_TILE_TOLERANCE: (f64, f64) = (5000.0, 20000.0);
/// Reject error bounds
pub const DEFAULT_REJECT_TOLERANCE: (f64, f64) = (5000.0, 20000.0);

/// Inclusive lower/upper pair of a user bound
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds<T> {
    /// Lower bound
    pub min: T,
    /// Upper bound
    pub max: T,
}

impl<T: Copy> Bounds<T> {
    /// Build a bound pair
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: Copy> From<(T, T)> for Bounds<T> {
    fn from((min, max): (T, T)) -> Self {
        Self { min, max }
    }
}

/// User configuration consumed by the painter
#[derive(Clone, Debug, PartialEq)]
pub struct PaintSettings {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Number of coarse-to-fine generations
    pub generations: usize,
    /// Maximum number of straight segments per stroke
    pub max_stroke_segments: usize,
    /// Stroke width bounds in pixels
    pub stroke_width: Bounds<u32>,
    /// Stroke length bounds in pixels
    pub stroke_length: Bounds<u32>,
    /// Gaussian blur sigma bounds
    pub blur_sigma: Bounds<f64>,
    /// Color variance tolerance for growing a stroke
    pub stroke_tolerance: Bounds<f64>,
    /// Color variance tolerance for flat regions
    pub tile_tolerance: Bounds<f64>,
    /// Reconstruction error above which a placement is discarded
    pub reject_tolerance: Bounds<f64>,
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            generations: DEFAULT_GENERATIONS,
            max_stroke_segments: DEFAULT_MAX_STROKE_SEGMENTS,
            stroke_width: DEFAULT_STROKE_WIDTH.into(),
            stroke_length: DEFAULT_STROKE_LENGTH.into(),
            blur_sigma: DEFAULT_BLUR_SIGMA.into(),
            stroke_tolerance: DEFAULT_STROKE_TOLERANCE.into(),
            tile_tolerance: DEFAULT_TILE_TOLERANCE.into(),
            reject_tolerance: DEFAULT_REJECT_TOLERANCE.into(),
        }
    }
}

impl PaintSettings {
    /// Default settings sized for a given canvas
    pub fn for_canvas(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check every field before a run starts
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero or oversized canvas, zero
    /// generations, a segment count the stroke library cannot represent,
    /// inverted bounds, a zero maximum stroke width, or negative/non-finite
    /// blur and tolerance values.
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_CANVAS_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_CANVAS_DIMENSION}"),
                ));
            }
        }

        if self.generations == 0 {
            return Err(invalid_parameter(
                "generations",
                &self.generations,
                &"at least one generation is required",
            ));
        }

        if self.max_stroke_segments == 0 || self.max_stroke_segments >= MAX_STROKE_POINTS {
            return Err(invalid_parameter(
                "max_stroke_segments",
                &self.max_stroke_segments,
                &format!(
                    "must be between 1 and {} (library strokes have at most {MAX_STROKE_POINTS} points)",
                    MAX_STROKE_POINTS - 1
                ),
            ));
        }

        check_order("stroke_width", self.stroke_width)?;
        check_order("stroke_length", self.stroke_length)?;
        if self.stroke_width.max == 0 {
            return Err(invalid_parameter(
                "stroke_width",
                &self.stroke_width.max,
                &"maximum stroke width must be positive",
            ));
        }

        for (parameter, bounds) in [
            ("blur_sigma", self.blur_sigma),
            ("stroke_tolerance", self.stroke_tolerance),
            ("tile_tolerance", self.tile_tolerance),
            ("reject_tolerance", self.reject_tolerance),
        ] {
            if !(bounds.min.is_finite() && bounds.max.is_finite()) || bounds.min < 0.0 {
                return Err(invalid_parameter(
                    parameter,
                    &format!("{}..{}", bounds.min, bounds.max),
                    &"must be finite and non-negative",
                ));
            }
            check_order(parameter, bounds)?;
        }

        Ok(())
    }
}

fn check_order<T: Copy + PartialOrd + std::fmt::Display>(
    parameter: &'static str,
    bounds: Bounds<T>,
) -> Result<()> {
    if bounds.min > bounds.max {
        return Err(invalid_parameter(
            parameter,
            &format!("{}..{}", bounds.min, bounds.max),
            &"minimum exceeds maximum",
        ));
    }
    Ok(())
}

/// Algorithm switches that are not part of the user's painting bounds
#[derive(Clone, Copy, Debug)]
// Each flag toggles an independent pipeline stage
#[allow(clippy::struct_excessive_bools)]
pub struct PainterOptions {
    /// Derivative kernel for the gradient field
    pub kernel: DerivativeKernel,
    /// Which traced dimension a template is scaled to
    pub resize_mode: ResizeMode,
    /// Apply normal-map shading to bright strokes
    pub shading: bool,
    /// End paths whose turn angle reaches `TURN_ANGLE_LIMIT`
    pub validate_turn_angle: bool,
    /// Record stroke ownership for boundary and skeleton export
    pub track_occupancy: bool,
    /// Seed for the seed pool; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for PainterOptions {
    fn default() -> Self {
        Self {
            kernel: DerivativeKernel::Sobel,
            resize_mode: ResizeMode::Width,
            shading: true,
            validate_turn_angle: true,
            track_occupancy: false,
            seed: None,
        }
    }
}
