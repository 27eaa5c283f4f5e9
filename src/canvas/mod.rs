//! Raster storage shared by every stage of the painter
//!
//! This module contains:
//! - A generic dense grid addressed by integer points
//! - RGB colors and the canvas alias built on the grid

/// RGB color arithmetic and the `Canvas` alias
pub mod color;
/// Generic 2D grid and integer points
pub mod grid;

pub use color::{Canvas, Rgb};
pub use grid::{Grid, Point};
