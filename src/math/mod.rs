//! Numeric building blocks for the painter

/// Kernel convolution, gaussian blur and box filtering
pub mod convolution;
/// Point offsets, angles and line rasterization
pub mod geometry;
/// Mean-color accumulation and color spread
pub mod statistics;
