//! Error types for painting runs, library loading and image I/O

use std::fmt;
use std::path::PathBuf;

/// Main error type for all painter operations
#[derive(Debug)]
pub enum PainterError {
    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a canvas to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Run configuration failed validation
    ///
    /// Reported before any generation starts and fatal for the run.
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The stroke library has no template for the requested point count
    ///
    /// Recoverable: the scheduler skips the candidate that asked for it.
    NoStrokeAvailable {
        /// Skeleton point count of the traced stroke
        points: usize,
    },

    /// A single stroke library file could not be used
    StrokeFile {
        /// Offending file
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// No usable stroke template was found under the library root
    EmptyLibrary {
        /// Library root directory
        path: PathBuf,
    },
}

impl fmt::Display for PainterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::NoStrokeAvailable { points } => {
                write!(f, "No stroke template available for {points}-point strokes")
            }
            Self::StrokeFile { path, reason } => {
                write!(f, "Unusable stroke file '{}': {reason}", path.display())
            }
            Self::EmptyLibrary { path } => {
                write!(
                    f,
                    "Stroke library '{}' contains no usable strokes",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PainterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for painter results
pub type Result<T> = std::result::Result<T, PainterError>;

impl From<image::ImageError> for PainterError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for PainterError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl PainterError {
    /// Whether the error only invalidates the current candidate stroke
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoStrokeAvailable { .. } | Self::StrokeFile { .. })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PainterError {
    PainterError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a per-file stroke library error
pub fn stroke_file_error(path: impl Into<PathBuf>, reason: &impl ToString) -> PainterError {
    PainterError::StrokeFile {
        path: path.into(),
        reason: reason.to_string(),
    }
}
