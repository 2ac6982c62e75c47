//! Phase vocoder time-stretching.
//!
//! ## Algorithm Overview
//!
//! 1. **Analysis**: STFT at the fixed analysis hop `Ha`
//! 2. **Hop selection**: synthesis hop `Hs = Ha / rate`, capped at half a frame
//! 3. **Phase unwrapping**: instantaneous frequency per bin from the phase
//!    increment between neighbouring analysis frames
//! 4. **Phase propagation**: each bin's phase advances by `frequency * Hs`
//!    per synthesis frame, keeping partials coherent from frame to frame
//! 5. **Phase locking**: every magnitude peak owns the bins down to the
//!    quietest bin towards the next peak. Only the peak keeps its propagated
//!    phase; the other bins of its region take the peak's phase plus their
//!    offset from it in the analysis frame (identity phase locking)
//! 6. **Synthesis**: overlap-add at `Hs`
//!
//! When the hop cap applies (very slow rates), synthesis frames walk through
//! the analysis frames at a fractional step and magnitudes are interpolated
//! between the two neighbours. Phase offsets come from the nearer of the two.

use crate::error::{Error, Result};
use crate::frame::{FrameSpec, SpectralFrame};
use crate::stft::{FrameTransform, OverlapAdd};
use clipshift_core::{AudioBuffer, CancellationToken, SpeedParams};
use rayon::prelude::*;
use std::f32::consts::PI;
use tracing::debug;

const TWO_PI: f32 = 2.0 * PI;

/// Magnitudes at or below this never count as spectral peaks
const PEAK_FLOOR: f32 = 1e-6;

/// Changes duration by `1 / rate` while keeping pitch.
#[derive(Debug, Clone)]
pub struct TimeStretcher {
    transform: FrameTransform,
}

impl TimeStretcher {
    pub fn new(spec: FrameSpec) -> Self {
        Self {
            transform: FrameTransform::new(spec),
        }
    }

    pub fn spec(&self) -> FrameSpec {
        self.transform.spec()
    }

    /// Synthesis hop used for `rate`.
    pub fn synthesis_hop(&self, rate: f64) -> usize {
        let spec = self.transform.spec();
        let max_hop = spec.frame_size() / 2;
        ((spec.hop_size() as f64 / rate).round() as usize).clamp(1, max_hop)
    }

    /// Stretch every channel of `input`.
    ///
    /// `rate == 1.0` hands the buffer back untouched. Channels are processed
    /// in parallel; each channel's frames are processed in order.
    pub fn process(
        &self,
        input: AudioBuffer,
        speed: SpeedParams,
        cancel: &CancellationToken,
    ) -> Result<AudioBuffer> {
        speed.validate()?;
        if speed.is_identity() {
            return Ok(input);
        }

        let rate = speed.rate as f64;
        let channels = input
            .channels()
            .par_iter()
            .map(|channel| self.stretch_samples(channel, rate, cancel))
            .collect::<Result<Vec<_>>>()?;

        let output = input.with_channels(channels)?;
        if !output.is_finite() {
            return Err(Error::NumericInstability(format!(
                "non-finite samples after time stretch at rate {}",
                rate
            )));
        }
        Ok(output)
    }

    /// Stretch a single channel. Output length is `round(len / rate)`.
    pub fn stretch_samples(
        &self,
        signal: &[f32],
        rate: f64,
        cancel: &CancellationToken,
    ) -> Result<Vec<f32>> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "stretch rate must be positive, got {}",
                rate
            )));
        }

        let output_len = (signal.len() as f64 / rate).round() as usize;
        if signal.is_empty() || output_len == 0 {
            return Ok(Vec::new());
        }

        let spec = self.transform.spec();
        let num_bins = spec.num_bins();
        let hop_analysis = spec.hop_size();
        let hop_synthesis = self.synthesis_hop(rate);
        // Analysis frames advanced per synthesis frame; 1.0 unless the hop was capped or rounded
        let step = hop_synthesis as f64 * rate / hop_analysis as f64;

        let analysis = self.transform.analyze(signal, cancel)?;
        let last = analysis.len() - 1;
        let num_synthesis_frames = output_len.div_ceil(hop_synthesis) + 1;

        debug!(
            "Stretching {} samples at rate {:.3}: Ha={}, Hs={}, step={:.4}, {} -> {} frames",
            signal.len(),
            rate,
            hop_analysis,
            hop_synthesis,
            step,
            analysis.len(),
            num_synthesis_frames
        );

        // Expected phase advance per analysis hop for each bin centre
        let expected_phase_diff: Vec<f32> = (0..num_bins)
            .map(|k| TWO_PI * k as f32 * hop_analysis as f32 / spec.frame_size() as f32)
            .collect();
        let hop_ratio = hop_synthesis as f32 / hop_analysis as f32;

        // Phase each bin would take if it advanced on its own
        let mut propagated = analysis[0].phase.clone();
        let mut peaks = Vec::with_capacity(num_bins / 2);
        let mut frame = SpectralFrame::silent(num_bins);
        let mut ola = OverlapAdd::new(&self.transform, hop_synthesis, num_synthesis_frames);

        for k in 0..num_synthesis_frames {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let position = k as f64 * step;
            let i0 = (position.floor() as usize).min(last);
            let i1 = (i0 + 1).min(last);
            let frac = if i0 == last {
                0.0
            } else {
                (position - i0 as f64) as f32
            };
            let (current, next) = (&analysis[i0], &analysis[i1]);
            // Frame whose bin-to-bin phase relations the synthesis frame copies
            let anchor = if frac < 0.5 { current } else { next };

            for bin in 0..num_bins {
                frame.magnitude[bin] =
                    current.magnitude[bin] * (1.0 - frac) + next.magnitude[bin] * frac;
            }

            find_peaks(&frame.magnitude, &mut peaks);
            if peaks.is_empty() {
                frame.phase.copy_from_slice(&propagated);
            } else {
                let mut lower = 0;
                for (j, &peak) in peaks.iter().enumerate() {
                    let upper = match peaks.get(j + 1) {
                        Some(&following) => region_boundary(&frame.magnitude, peak, following),
                        None => num_bins,
                    };
                    let peak_phase = propagated[peak];
                    for bin in lower..upper {
                        frame.phase[bin] =
                            wrap_phase(peak_phase + anchor.phase[bin] - anchor.phase[peak]);
                    }
                    lower = upper;
                }
            }

            for bin in 0..num_bins {
                // Past the last analysis frame the bin keeps its nominal frequency
                let expected = expected_phase_diff[bin];
                let phase_diff = if i1 == i0 {
                    expected
                } else {
                    next.phase[bin] - current.phase[bin]
                };
                let deviation = wrap_phase(phase_diff - expected);
                let true_freq = expected + deviation;

                propagated[bin] = wrap_phase(frame.phase[bin] + true_freq * hop_ratio);
            }

            ola.push_frame(&frame);
        }

        Ok(ola.finish(output_len))
    }
}

/// Local magnitude maxima, ignoring bins that are numerically silent.
fn find_peaks(magnitude: &[f32], peaks: &mut Vec<usize>) {
    peaks.clear();
    for bin in 1..magnitude.len().saturating_sub(1) {
        let m = magnitude[bin];
        if m > PEAK_FLOOR && m > magnitude[bin - 1] && m >= magnitude[bin + 1] {
            peaks.push(bin);
        }
    }
}

/// First bin owned by `following`: the quietest bin between the two peaks.
fn region_boundary(magnitude: &[f32], peak: usize, following: usize) -> usize {
    (peak + 1..following)
        .min_by(|&a, &b| magnitude[a].total_cmp(&magnitude[b]))
        .unwrap_or(following)
}

/// Wrap phase to [-PI, PI]
#[inline]
pub(crate) fn wrap_phase(phase: f32) -> f32 {
    phase - TWO_PI * (phase / TWO_PI).round()
}
