//! Painterly image reconstruction from a library of textured brush strokes
//!
//! Each generation traces strokes along the edge field of a blurred source,
//! matches them against scanned stroke templates, and composites the
//! candidates that reduce the reconstruction error. Generations run from
//! coarse to fine.

#![forbid(unsafe_code)]

/// Generic grids, points and RGB colors
pub mod canvas;
/// Input/output operations, configuration and error handling
pub mod io;
/// Convolution, geometry and color statistics
pub mod math;
/// Generation scheduling, compositing and occupancy tracking
pub mod painter;
/// Stroke templates, library classification and shading
pub mod stroke;
/// Gradient field, region search and path assembly
pub mod trace;

pub use io::error::{PainterError, Result};
