pub mod convolution;
pub mod geometry;
pub mod statistics;
