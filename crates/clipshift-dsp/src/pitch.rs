//! Duration-preserving pitch shifting.
//!
//! A shift by ratio `r` is a pitch-preserving stretch to `r` times the length
//! followed by a linear resample back to the original length. The resample
//! transposes everything by `r`; the stretch beforehand cancels its effect on
//! duration.

use crate::error::{Error, Result};
use crate::frame::FrameSpec;
use crate::resample::resample_linear;
use crate::stretch::TimeStretcher;
use clipshift_core::{AudioBuffer, CancellationToken, PitchParams};
use rayon::prelude::*;
use tracing::debug;

/// Scales every frequency by `2^(semitones / 12)` without changing duration.
#[derive(Debug, Clone)]
pub struct PitchShifter {
    stretcher: TimeStretcher,
}

impl PitchShifter {
    pub fn new(spec: FrameSpec) -> Self {
        Self {
            stretcher: TimeStretcher::new(spec),
        }
    }

    /// Build on an existing stretcher (shares its FFT plans).
    pub fn with_stretcher(stretcher: TimeStretcher) -> Self {
        Self { stretcher }
    }

    /// Shift every channel of `input`.
    ///
    /// Zero semitones hands the buffer back untouched. The output always has
    /// exactly as many samples as the input.
    pub fn process(
        &self,
        input: AudioBuffer,
        pitch: PitchParams,
        cancel: &CancellationToken,
    ) -> Result<AudioBuffer> {
        pitch.validate()?;
        if pitch.is_identity() {
            return Ok(input);
        }

        let ratio = pitch.ratio();
        debug!(
            "Pitch shift {} semitones (ratio {:.4}) over {} channel(s)",
            pitch.semitones,
            ratio,
            input.num_channels()
        );

        let channels = input
            .channels()
            .par_iter()
            .map(|channel| self.shift_samples(channel, ratio, cancel))
            .collect::<Result<Vec<_>>>()?;

        let output = input.with_channels(channels)?;
        if !output.is_finite() {
            return Err(Error::NumericInstability(format!(
                "non-finite samples after pitch shift of {} semitones",
                pitch.semitones
            )));
        }
        Ok(output)
    }

    /// Shift a single channel by frequency `ratio`.
    pub fn shift_samples(
        &self,
        signal: &[f32],
        ratio: f64,
        cancel: &CancellationToken,
    ) -> Result<Vec<f32>> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "pitch ratio must be positive, got {}",
                ratio
            )));
        }

        // Stretching at 1/r makes the clip r times longer with the pitch intact
        let stretched = self.stretcher.stretch_samples(signal, 1.0 / ratio, cancel)?;
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(resample_linear(&stretched, signal.len()))
    }
}
