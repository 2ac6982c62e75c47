//! Core audio types for clipshift.
//!
//! # Primary API
//!
//! - [`AudioBuffer`]: Planar float samples + sample rate
//! - [`TimeRange`]: Trim range in seconds, fitted to a clip with [`TimeRange::normalize`]
//! - [`PitchParams`] / [`SpeedParams`]: Validated effect parameters
//! - [`timecode`]: `MM:SS` parsing and formatting
//! - [`Decoder`]: Seam for turning encoded bytes into an [`AudioBuffer`]
//! - [`CancellationToken`]: Cooperative cancellation for long operations
//!
//! # Feature Flags
//!
//! - `wav` (default): Native WAV decoding via hound
//! - `serialization`: Serde derives on parameter types
//!
//! # Example
//!
//! ```
//! use clipshift_core::{timecode, AudioBuffer, TimeRange};
//!
//! let buffer = AudioBuffer::mono(44100, vec![0.0; 44100 * 10]).unwrap();
//! let range = TimeRange::new(timecode::parse("00:02"), timecode::parse("00:05"))
//!     .normalize(buffer.duration())
//!     .unwrap();
//! let clip = buffer.slice(range).unwrap();
//! assert_eq!(clip.len(), 44100 * 3);
//! ```

pub mod error;
pub use error::{Error, Result};

mod buffer;
pub use buffer::AudioBuffer;

mod range;
pub use range::TimeRange;

mod params;
pub use params::{PitchParams, SpeedParams};

mod cancel;
pub use cancel::CancellationToken;

mod decoder;
pub use decoder::{ContainerHint, Decoder};
#[cfg(feature = "wav")]
pub use decoder::WavDecoder;

pub mod timecode;
