//! # clipshift - Audio Clip Editor
//!
//! Trim a clip, shift its pitch, change its speed, and export the result.
//!
//! ## Architecture
//!
//! clipshift is an umbrella crate that coordinates:
//! - **clipshift-core** - Buffers, time ranges, `MM:SS` time codes, parameters, decoding
//! - **clipshift-dsp** - STFT/ISTFT, phase-vocoder time stretch and pitch shift
//! - **clipshift-export** - Native WAV encoding, encoder hand-off for MP3, resampling
//!
//! ## Quick Start
//!
//! ```
//! use clipshift::prelude::*;
//!
//! let samples: Vec<f32> = (0..44100 * 3)
//!     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin() * 0.5)
//!     .collect();
//! let clip = AudioBuffer::mono(44100, samples).unwrap();
//!
//! // Seconds 1 to 2, one octave up, normal speed, as WAV
//! let wav = clipshift::process(
//!     clip,
//!     TimeRange::new(1.0, 2.0),
//!     PitchParams::new(12.0).unwrap(),
//!     SpeedParams::default(),
//!     AudioFormat::Wav,
//! )
//! .unwrap();
//! assert_eq!(&wav[0..4], b"RIFF");
//! ```
//!
//! ## Feature Flags
//!
//! - `wav` (default) - Native WAV decoding and encoding
//! - `serialization` - Serde derives on request and option types

/// Re-export of clipshift-core for direct access
pub use clipshift_core as core;
/// Re-export of clipshift-dsp for direct access
pub use clipshift_dsp as dsp;
/// Re-export of clipshift-export for direct access
pub use clipshift_export as export;

// Core types
pub use clipshift_core::{
    timecode, AudioBuffer, CancellationToken, ContainerHint, Decoder, PitchParams, SpeedParams,
    TimeRange,
};

#[cfg(feature = "wav")]
pub use clipshift_core::WavDecoder;

// DSP types
pub use clipshift_dsp::{FrameSpec, PitchShifter, TimeStretcher};

// Export types
pub use clipshift_export::{AudioFormat, BitDepth, Encoder, ExportOptions, ResampleQuality};

mod builder;
mod error;
mod pipeline;
mod request;

pub use builder::PipelineBuilder;
pub use error::{Error, ErrorCategory, Result};
pub use pipeline::{Pipeline, ProcessPhase, ProcessProgress};
pub use request::ProcessRequest;

/// Run one edit with the default pipeline.
///
/// Equivalent to `Pipeline::default().process(input, &request)`. MP3 needs an
/// encoder, so use [`Pipeline::builder`] for anything other than WAV.
pub fn process(
    input: AudioBuffer,
    range: TimeRange,
    pitch: PitchParams,
    speed: SpeedParams,
    format: AudioFormat,
) -> Result<Vec<u8>> {
    let request = ProcessRequest {
        range,
        pitch,
        speed,
        format,
    };
    Pipeline::default().process(input, &request)
}

/// Convenient imports for common usage.
///
/// ```
/// use clipshift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        timecode, AudioBuffer, AudioFormat, BitDepth, CancellationToken, Encoder, Error,
        ErrorCategory, ExportOptions, FrameSpec, Pipeline, PipelineBuilder, PitchParams,
        ProcessPhase, ProcessProgress, ProcessRequest, Result, SpeedParams, TimeRange,
    };

    #[cfg(feature = "wav")]
    pub use crate::WavDecoder;

    pub use crate::{ContainerHint, Decoder};
}
