//! Stroke tracing over the source canvas
//!
//! This module contains:
//! - The per-generation gradient field
//! - Disk masks and the circular width search
//! - Oriented rectangles and the straight segment search
//! - Multi-segment path assembly
//! - Seed selection strategies

/// Circular region search fixing a stroke's width
pub mod circle;
/// Seed pool and point decider strategies
pub mod decider;
/// Precomputed disk masks keyed by radius
pub mod disk;
/// Edge direction field
pub mod gradient;
/// Straight segment search
pub mod linear;
/// Segmented path assembly
pub mod path;
/// Oriented rectangle geometry
pub mod rectangle;

pub use decider::{PointDecider, RandomPointDecider, SeedPool};
pub use gradient::{DerivativeKernel, GradientField};
pub use path::{PathAssembler, TraceDirection, TracePath, TraceTermination};
