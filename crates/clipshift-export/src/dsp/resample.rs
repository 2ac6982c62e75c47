//! Sample rate conversion using rubato

use crate::error::{ExportError, Result};
use clipshift_core::AudioBuffer;
use rubato::{FftFixedIn, Resampler};

/// Resampling quality presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum ResampleQuality {
    /// Fast resampling (lower quality)
    Fast,
    /// Balanced quality/speed (default)
    #[default]
    Medium,
    /// High quality
    High,
    /// Best quality (slowest)
    Best,
}

impl ResampleQuality {
    fn chunk_size(&self) -> usize {
        match self {
            ResampleQuality::Fast => 512,
            ResampleQuality::Medium => 1024,
            ResampleQuality::High => 2048,
            ResampleQuality::Best => 4096,
        }
    }

    fn sub_chunks(&self) -> usize {
        match self {
            ResampleQuality::Fast => 1,
            ResampleQuality::Medium => 2,
            ResampleQuality::High => 4,
            ResampleQuality::Best => 8,
        }
    }
}

/// Convert every channel of `buffer` to `target_rate`.
///
/// The output holds `ceil(len * target / source)` frames, aligned with the
/// input (the resampler's own delay is removed).
pub fn resample_buffer(
    buffer: &AudioBuffer,
    target_rate: u32,
    quality: ResampleQuality,
) -> Result<AudioBuffer> {
    let source_rate = buffer.sample_rate();
    if source_rate == target_rate {
        return Ok(buffer.clone());
    }
    if target_rate == 0 {
        return Err(ExportError::InvalidOptions(
            "Target sample rate must be positive".into(),
        ));
    }

    let num_channels = buffer.num_channels();
    let input_frames = buffer.len();
    let expected_output_frames =
        (input_frames as f64 * target_rate as f64 / source_rate as f64).ceil() as usize;

    if input_frames == 0 {
        return Ok(AudioBuffer::new(target_rate, vec![Vec::new(); num_channels])?);
    }

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        target_rate as usize,
        quality.chunk_size(),
        quality.sub_chunks(),
        num_channels,
    )?;
    let delay = resampler.output_delay();

    let mut output: Vec<Vec<f32>> =
        vec![Vec::with_capacity(expected_output_frames + delay); num_channels];

    // Past the end the input is zero padded until the delayed tail is out
    let mut pos = 0;
    while output[0].len() < expected_output_frames + delay {
        let needed = resampler.input_frames_next();
        let chunk: Vec<Vec<f32>> = buffer
            .channels()
            .iter()
            .map(|channel| {
                let mut block = vec![0.0f32; needed];
                if pos < input_frames {
                    let end = (pos + needed).min(input_frames);
                    block[..end - pos].copy_from_slice(&channel[pos..end]);
                }
                block
            })
            .collect();

        let processed = resampler.process(&chunk, None)?;
        for (out, block) in output.iter_mut().zip(processed) {
            out.extend_from_slice(&block);
        }
        pos += needed;
    }

    for channel in output.iter_mut() {
        channel.drain(..delay);
        channel.truncate(expected_output_frames);
    }

    Ok(AudioBuffer::new(target_rate, output)?)
}
