//! # clipshift DSP
//!
//! Offline phase-vocoder processing for whole clips:
//! - **FrameTransform**: STFT analysis and overlap-add resynthesis
//! - **TimeStretcher**: change duration, keep pitch
//! - **PitchShifter**: change pitch, keep duration
//! - **Analysis**: dominant-frequency and level measurement
//!
//! Every operation takes an [`AudioBuffer`](clipshift_core::AudioBuffer) (or a
//! single channel slice) and returns a new one. Channels are processed
//! independently and in parallel; output is bit-reproducible.
//!
//! ## Example
//!
//! ```rust
//! use clipshift_core::{AudioBuffer, CancellationToken, PitchParams, SpeedParams};
//! use clipshift_dsp::{FrameSpec, PitchShifter, TimeStretcher};
//!
//! let samples: Vec<f32> = (0..44100)
//!     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
//!     .collect();
//! let buffer = AudioBuffer::mono(44100, samples).unwrap();
//! let cancel = CancellationToken::new();
//!
//! let shifted = PitchShifter::new(FrameSpec::default())
//!     .process(buffer, PitchParams::new(12.0).unwrap(), &cancel)
//!     .unwrap();
//! let faster = TimeStretcher::new(FrameSpec::default())
//!     .process(shifted, SpeedParams::new(2.0).unwrap(), &cancel)
//!     .unwrap();
//! assert_eq!(faster.len(), 22050);
//! ```

mod error;
pub use error::{Error, Result};

pub mod analysis;
pub mod frame;
pub mod resample;
pub mod stft;

mod pitch;
mod stretch;

pub use analysis::{block_peaks, dominant_frequency, rms};
pub use frame::{FrameSpec, SpectralFrame, DEFAULT_FRAME_SIZE};
pub use pitch::PitchShifter;
pub use resample::resample_linear;
pub use stft::{FrameTransform, OverlapAdd};
pub use stretch::TimeStretcher;
