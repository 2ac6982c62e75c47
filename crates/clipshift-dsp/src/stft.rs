//! Short-time Fourier transform and overlap-add resynthesis.
//!
//! ## Framing
//!
//! Signals are centred: `frame_size / 2` zeros are placed in front so the
//! first frame's window peaks on the first sample, and the tail is zero-padded
//! until the last frame's centre reaches the last sample. Synthesis removes
//! the same offset, so analysis and synthesis positions line up sample for
//! sample.
//!
//! ## Normalization
//!
//! Each resynthesized frame is windowed again before it is added to the
//! output, and the squared window is accumulated into an envelope. Dividing by
//! that envelope undoes the overlap gain for any synthesis hop, which is what
//! lets the time stretcher lay frames out at a different spacing than they
//! were analysed at.
//!
//! Frames are accumulated strictly in order on one thread, so identical input
//! always produces bit-identical output.

use crate::error::{Error, Result};
use crate::frame::{FrameSpec, SpectralFrame};
use clipshift_core::CancellationToken;
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Envelope values below this are treated as "no frame covers this sample".
const ENVELOPE_FLOOR: f32 = 1e-6;

/// Planned forward/inverse FFTs plus the analysis window for one [`FrameSpec`].
///
/// Immutable after construction and safe to share across threads; per-call
/// scratch buffers are allocated by each operation.
#[derive(Clone)]
pub struct FrameTransform {
    spec: FrameSpec,
    window: Vec<f32>,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
}

impl std::fmt::Debug for FrameTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameTransform")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

impl FrameTransform {
    pub fn new(spec: FrameSpec) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(spec.frame_size());
        let inverse = planner.plan_fft_inverse(spec.frame_size());

        Self {
            spec,
            window: spec.window(),
            forward,
            inverse,
        }
    }

    pub fn spec(&self) -> FrameSpec {
        self.spec
    }

    pub fn window(&self) -> &[f32] {
        &self.window
    }

    /// Number of analysis frames [`analyze`](Self::analyze) produces for a
    /// signal of `len` samples.
    pub fn analysis_frame_count(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            len.div_ceil(self.spec.hop_size()) + 1
        }
    }

    /// Analyse one channel into magnitude/phase frames at the fixed hop.
    ///
    /// Returns [`Error::Cancelled`] if `cancel` fires between frames.
    pub fn analyze(&self, signal: &[f32], cancel: &CancellationToken) -> Result<Vec<SpectralFrame>> {
        let size = self.spec.frame_size();
        let hop = self.spec.hop_size();
        let pad = size / 2;
        let num_bins = self.spec.num_bins();
        let num_frames = self.analysis_frame_count(signal.len());

        let mut buffer = vec![Complex::new(0.0f32, 0.0); size];
        let mut frames = Vec::with_capacity(num_frames);

        for frame_idx in 0..num_frames {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            // Padded position p holds signal[p - pad]; everything else is zero
            let start = frame_idx * hop;
            for (i, slot) in buffer.iter_mut().enumerate() {
                let sample = (start + i)
                    .checked_sub(pad)
                    .and_then(|idx| signal.get(idx))
                    .copied()
                    .unwrap_or(0.0);
                *slot = Complex::new(sample * self.window[i], 0.0);
            }

            self.forward.process(&mut buffer);

            let mut frame = SpectralFrame::silent(num_bins);
            for (bin, value) in buffer.iter().take(num_bins).enumerate() {
                frame.magnitude[bin] = value.norm();
                frame.phase[bin] = value.arg();
            }
            frames.push(frame);
        }

        Ok(frames)
    }

    /// Overlap-add `frames` spaced `synthesis_hop` apart and return exactly
    /// `output_len` samples.
    pub fn synthesize(
        &self,
        frames: &[SpectralFrame],
        synthesis_hop: usize,
        output_len: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<f32>> {
        let mut ola = OverlapAdd::new(self, synthesis_hop, frames.len());
        for frame in frames {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            ola.push_frame(frame);
        }
        Ok(ola.finish(output_len))
    }
}

/// Incremental overlap-add accumulator.
///
/// Frames are pushed in time order; each lands `synthesis_hop` samples after
/// the previous one.
pub struct OverlapAdd<'a> {
    transform: &'a FrameTransform,
    synthesis_hop: usize,
    buffer: Vec<Complex<f32>>,
    output: Vec<f32>,
    envelope: Vec<f32>,
    frames_written: usize,
}

impl<'a> OverlapAdd<'a> {
    /// `expected_frames` only sizes the initial allocation.
    pub fn new(transform: &'a FrameTransform, synthesis_hop: usize, expected_frames: usize) -> Self {
        let size = transform.spec.frame_size();
        let synthesis_hop = synthesis_hop.max(1);
        let capacity = expected_frames.saturating_sub(1) * synthesis_hop + size;

        Self {
            transform,
            synthesis_hop,
            buffer: vec![Complex::new(0.0, 0.0); size],
            output: Vec::with_capacity(capacity),
            envelope: Vec::with_capacity(capacity),
            frames_written: 0,
        }
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Inverse-transform one frame and add it at the next synthesis position.
    pub fn push_frame(&mut self, frame: &SpectralFrame) {
        let size = self.transform.spec.frame_size();
        let nyquist = size / 2;
        let window = &self.transform.window;

        // 1. Rebuild the full Hermitian spectrum from magnitude/phase
        for bin in 0..=nyquist {
            let magnitude = frame.magnitude.get(bin).copied().unwrap_or(0.0);
            let phase = frame.phase.get(bin).copied().unwrap_or(0.0);
            self.buffer[bin] = Complex::from_polar(magnitude, phase);
        }
        // DC and Nyquist must be real for a real signal
        self.buffer[0].im = 0.0;
        self.buffer[nyquist].im = 0.0;
        for bin in 1..nyquist {
            self.buffer[size - bin] = self.buffer[bin].conj();
        }

        // 2. Inverse FFT
        self.transform.inverse.process(&mut self.buffer);

        // 3. Window and accumulate
        let offset = self.frames_written * self.synthesis_hop;
        let end = offset + size;
        if self.output.len() < end {
            self.output.resize(end, 0.0);
            self.envelope.resize(end, 0.0);
        }

        let scale = 1.0 / size as f32;
        for i in 0..size {
            let w = window[i];
            self.output[offset + i] += self.buffer[i].re * scale * w;
            self.envelope[offset + i] += w * w;
        }

        self.frames_written += 1;
    }

    /// Normalize by the window envelope, drop the centring pad and return
    /// exactly `output_len` samples (zero-filled if frames ran short).
    pub fn finish(self, output_len: usize) -> Vec<f32> {
        let pad = self.transform.spec.frame_size() / 2;

        (0..output_len)
            .map(|i| {
                let idx = pad + i;
                match (self.output.get(idx), self.envelope.get(idx)) {
                    (Some(&sample), Some(&env)) if env > ENVELOPE_FLOOR => sample / env,
                    _ => 0.0,
                }
            })
            .collect()
    }
}
