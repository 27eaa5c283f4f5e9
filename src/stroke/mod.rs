//! Stroke templates, classification and per-placement instances
//!
//! This module contains:
//! - Shape descriptors and their normalization
//! - The template library, its on-disk reader and the classifier
//! - Stroke instances (resize, rotation) and Phong shading

/// Shape feature vector
pub mod descriptor;
/// Per-placement stroke instances
pub mod instance;
/// Template library and classification
pub mod library;
/// Feature normalization ranges
pub mod normalization;
/// On-disk library reader
pub mod reader;
/// Normal-map shading
pub mod shading;
/// Library templates
pub mod template;

pub use descriptor::StrokeDescriptor;
pub use instance::{ResizeMode, StrokeInstance};
pub use library::StrokeLibrary;
pub use template::StrokeTemplate;
