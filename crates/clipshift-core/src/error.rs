//! Error types for clipshift-core.

use thiserror::Error;

/// Error type for clipshift-core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid range: start={start}, end={end}. Start must be before end")]
    InvalidRange { start: f64, end: f64 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid buffer: {0}")]
    InvalidBuffer(String),

    #[error("Decode failure: {0}")]
    Decode(String),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(feature = "wav")]
impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Self {
        Error::Decode(e.to_string())
    }
}
