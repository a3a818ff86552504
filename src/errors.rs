//! Custom error types for the reprojection engine
//!
//! The core geometry and resampling operations signal failure through
//! return values (invalid extents, `Option`). This error type covers the
//! surrounding layers: SRS lookup, configuration, file adapters and the CLI.

use std::fmt;
use std::io;

/// Error types for rasterwarp operations
#[derive(Debug)]
pub enum WarpError {
    /// I/O error
    IoError(io::Error),
    /// Image decoding or encoding error
    ImageError(image::ImageError),
    /// Spatial reference identifier could not be resolved
    UnknownSrs(String),
    /// An extent was invalid where a valid one is required
    InvalidExtent(String),
    /// Configuration file or value error
    ConfigError(String),
    /// Malformed input data (grids, bounds strings, points)
    ParseError(String),
    /// Operation produced no result (no overlap, failed reprojection)
    EmptyResult(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for WarpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarpError::IoError(e) => write!(f, "I/O error: {}", e),
            WarpError::ImageError(e) => write!(f, "Image error: {}", e),
            WarpError::UnknownSrs(id) => write!(f, "Unknown spatial reference: {}", id),
            WarpError::InvalidExtent(msg) => write!(f, "Invalid extent: {}", msg),
            WarpError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            WarpError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            WarpError::EmptyResult(msg) => write!(f, "Empty result: {}", msg),
            WarpError::GenericError(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for WarpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WarpError::IoError(e) => Some(e),
            WarpError::ImageError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for WarpError {
    fn from(error: io::Error) -> Self {
        WarpError::IoError(error)
    }
}

impl From<image::ImageError> for WarpError {
    fn from(error: image::ImageError) -> Self {
        WarpError::ImageError(error)
    }
}

impl From<toml::de::Error> for WarpError {
    fn from(error: toml::de::Error) -> Self {
        WarpError::ConfigError(error.to_string())
    }
}

impl From<String> for WarpError {
    fn from(msg: String) -> Self {
        WarpError::GenericError(msg)
    }
}

/// Result type for rasterwarp operations
pub type WarpResult<T> = Result<T, WarpError>;
