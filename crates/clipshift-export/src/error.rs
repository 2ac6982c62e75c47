//! Error types for clipshift-export

use std::io;
use thiserror::Error;

/// Export error type
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error while writing encoded bytes
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported format or feature not enabled
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Invalid export options
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Encoding error (native writer or external encoder)
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Resampling error
    #[error("Resampling error: {0}")]
    Resample(String),

    /// Invalid audio data
    #[error("Invalid audio data: {0}")]
    InvalidData(String),
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

// From trait implementations for external library errors at API boundary
// These convert complex external error types to simple strings for user-facing messages

#[cfg(feature = "wav")]
impl From<hound::Error> for ExportError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) => ExportError::Io(io),
            other => ExportError::Encoding(other.to_string()),
        }
    }
}

impl From<rubato::ResamplerConstructionError> for ExportError {
    fn from(e: rubato::ResamplerConstructionError) -> Self {
        ExportError::Resample(e.to_string())
    }
}

impl From<rubato::ResampleError> for ExportError {
    fn from(e: rubato::ResampleError) -> Self {
        ExportError::Resample(e.to_string())
    }
}

impl From<clipshift_core::Error> for ExportError {
    fn from(e: clipshift_core::Error) -> Self {
        ExportError::InvalidData(e.to_string())
    }
}
