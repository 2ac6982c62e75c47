//! Decoder seam.
//!
//! Turning downloaded container bytes into samples belongs to whatever media
//! layer fetched them. This module only fixes the shape of that hand-off and
//! ships a native decoder for plain WAV so the crate is usable on its own.

use crate::buffer::AudioBuffer;
use crate::error::{Error, Result};

/// What the bytes are believed to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerHint {
    #[default]
    Unknown,
    Wav,
    Mp3,
    Mp4,
}

impl ContainerHint {
    /// Guess from a file extension (case-insensitive, without dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "wav" | "wave" => ContainerHint::Wav,
            "mp3" => ContainerHint::Mp3,
            "mp4" | "m4a" => ContainerHint::Mp4,
            _ => ContainerHint::Unknown,
        }
    }
}

/// Turns encoded bytes into an [`AudioBuffer`].
pub trait Decoder: Send + Sync {
    fn decode(&self, bytes: &[u8], hint: ContainerHint) -> Result<AudioBuffer>;
}

/// Native RIFF/WAVE decoder (integer PCM and 32-bit float).
#[cfg(feature = "wav")]
#[derive(Debug, Clone, Copy, Default)]
pub struct WavDecoder;

#[cfg(feature = "wav")]
impl Decoder for WavDecoder {
    fn decode(&self, bytes: &[u8], hint: ContainerHint) -> Result<AudioBuffer> {
        use hound::{SampleFormat, WavReader};

        if !matches!(hint, ContainerHint::Wav | ContainerHint::Unknown) {
            return Err(Error::Decode(format!(
                "WAV decoder cannot read {:?} containers",
                hint
            )));
        }

        let reader = WavReader::new(std::io::Cursor::new(bytes))?;
        let spec = reader.spec();
        tracing::debug!(
            "Decoding WAV: {} Hz, {} channels, {} bit {:?}",
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample,
            spec.sample_format
        );

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<_, _>>()?,
            SampleFormat::Int => {
                let scale = 1.0 / (1_i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<std::result::Result<_, _>>()?
            }
        };

        AudioBuffer::from_interleaved(spec.sample_rate, spec.channels as usize, &interleaved)
            .map_err(|e| Error::Decode(e.to_string()))
    }
}
