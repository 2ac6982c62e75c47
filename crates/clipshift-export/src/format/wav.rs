//! WAV encoding using hound
//!
//! Supports 16-bit, 24-bit, and 32-bit float WAV with any channel count.

use crate::error::{ExportError, Result};
use crate::options::BitDepth;
use clipshift_core::AudioBuffer;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::{Cursor, Seek, Write};

/// WAV encoder configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WavConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bit depth
    pub bit_depth: BitDepth,
    /// Number of channels
    pub channels: u16,
}

impl Default for WavConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            bit_depth: BitDepth::Int16,
            channels: 2,
        }
    }
}

impl WavConfig {
    /// Config matching a buffer's rate and channel count.
    pub fn for_buffer(buffer: &AudioBuffer, bit_depth: BitDepth) -> Result<Self> {
        let channels = u16::try_from(buffer.num_channels()).map_err(|_| {
            ExportError::InvalidData(format!(
                "{} channels exceed the WAV limit",
                buffer.num_channels()
            ))
        })?;

        Ok(Self {
            sample_rate: buffer.sample_rate(),
            bit_depth,
            channels,
        })
    }

    fn spec(&self) -> WavSpec {
        let sample_format = match self.bit_depth {
            BitDepth::Float32 => SampleFormat::Float,
            BitDepth::Int16 | BitDepth::Int24 => SampleFormat::Int,
        };

        WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bit_depth.bits(),
            sample_format,
        }
    }
}

/// Encode a buffer to WAV in memory
///
/// # Returns
/// Complete RIFF/WAVE file bytes
pub fn encode_wav_memory(buffer: &AudioBuffer, config: &WavConfig) -> Result<Vec<u8>> {
    if config.channels as usize != buffer.num_channels() {
        return Err(ExportError::InvalidOptions(format!(
            "WAV config has {} channels but buffer has {}",
            config.channels,
            buffer.num_channels()
        )));
    }
    if config.sample_rate == 0 {
        return Err(ExportError::InvalidOptions("Sample rate must be positive".into()));
    }

    let mut bytes = Vec::new();
    {
        let mut writer = WavWriter::new(Cursor::new(&mut bytes), config.spec())?;
        write_samples(&mut writer, buffer, config.bit_depth)?;
        // Finalize patches the header sizes
        writer.finalize()?;
    }

    Ok(bytes)
}

/// Write interleaved frames to the writer
fn write_samples<W: Write + Seek>(
    writer: &mut WavWriter<W>,
    buffer: &AudioBuffer,
    bit_depth: BitDepth,
) -> Result<()> {
    let channels = buffer.channels();
    for i in 0..buffer.len() {
        for channel in channels {
            let sample = channel[i];
            match bit_depth {
                BitDepth::Int16 => writer.write_sample(float_to_i16(sample))?,
                BitDepth::Int24 => writer.write_sample(float_to_i24(sample))?,
                BitDepth::Float32 => writer.write_sample(sample)?,
            }
        }
    }
    Ok(())
}

/// Convert float sample to 16-bit integer with clipping
#[inline]
fn float_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 32767.0) as i16
}

/// Convert float sample to 24-bit integer (stored as i32) with clipping
#[inline]
fn float_to_i24(sample: f32) -> i32 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 8388607.0) as i32
}
