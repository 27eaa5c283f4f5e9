//! Files, configuration and terminal output
//!
//! This module contains:
//! - The error taxonomy and algorithm constants
//! - Image decoding and encoding for canvases
//! - The command-line batch runner and its progress display

/// Command-line interface and output file handling
pub mod cli;
/// Algorithm constants and run configuration
pub mod configuration;
/// Error types and result aliases
pub mod error;
/// Canvas decoding and encoding
pub mod image;
/// Terminal progress display
pub mod progress;
