//! External encoders for compressed formats.

use crate::error::Result;
use crate::options::AudioFormat;
use clipshift_core::AudioBuffer;

/// Encodes a finished buffer into a compressed container.
///
/// Implementations wrap whatever codec library the host application ships
/// (LAME bindings, a system `ffmpeg`, a web service). [`export`](crate::export)
/// calls the encoder only for formats it cannot write natively.
pub trait Encoder: Send + Sync {
    /// Encode `buffer` as `format`, returning the complete file bytes.
    fn encode(&self, buffer: &AudioBuffer, format: AudioFormat) -> Result<Vec<u8>>;

    /// Whether this encoder handles `format`.
    fn supports(&self, format: AudioFormat) -> bool {
        format == AudioFormat::Mp3
    }
}
