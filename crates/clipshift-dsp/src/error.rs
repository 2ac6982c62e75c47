//! Error types for clipshift-dsp

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid frame spec: {0}")]
    InvalidFrameSpec(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// NaN or infinity appeared in processed audio. Indicates a defect, not bad input.
    #[error("Numeric instability: {0}")]
    NumericInstability(String),

    #[error("Processing cancelled")]
    Cancelled,

    #[error(transparent)]
    Core(#[from] clipshift_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
