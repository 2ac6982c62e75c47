//! Centralized error type for the clipshift umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] clipshift_core::Error),

    #[error("DSP: {0}")]
    Dsp(#[from] clipshift_dsp::Error),

    #[error("Export: {0}")]
    Export(#[from] clipshift_export::ExportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Who can fix a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad range or parameter; the caller can re-enter values and retry.
    InvalidInput,
    /// Decoding, DSP, encoding or I/O failed.
    ProcessingFailure,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        use clipshift_core::Error as CoreError;
        use clipshift_dsp::Error as DspError;

        let invalid_core = |e: &CoreError| {
            matches!(
                e,
                CoreError::InvalidRange { .. } | CoreError::InvalidParameter(_)
            )
        };

        let invalid = match self {
            Error::Core(e) => invalid_core(e),
            Error::Dsp(DspError::Core(e)) => invalid_core(e),
            Error::Dsp(e) => matches!(
                e,
                DspError::InvalidParameter(_) | DspError::InvalidFrameSpec(_)
            ),
            Error::Export(_) | Error::Io(_) => false,
        };

        if invalid {
            ErrorCategory::InvalidInput
        } else {
            ErrorCategory::ProcessingFailure
        }
    }

    /// True when processing stopped because a cancellation token fired.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Dsp(clipshift_dsp::Error::Cancelled))
    }
}
