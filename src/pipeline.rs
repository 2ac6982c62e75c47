//! Trim, pitch-shift, time-stretch, export.

use crate::{PipelineBuilder, ProcessRequest, Result};
use clipshift_core::{AudioBuffer, CancellationToken};
use clipshift_dsp::{Error as DspError, PitchShifter, TimeStretcher};
use clipshift_export::{Encoder, ExportOptions};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct ProcessProgress {
    pub phase: ProcessPhase,
    /// Progress within current phase (0.0 to 1.0).
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessPhase {
    Trimming,
    PitchShifting,
    TimeStretching,
    Encoding,
}

/// The clip editing pipeline.
///
/// Stages always run in the order trim, pitch shift, time stretch, export.
/// A pipeline holds no per-clip state, so one instance can serve any number
/// of requests, including concurrently.
///
/// # Example
/// ```
/// use clipshift::prelude::*;
///
/// let samples: Vec<f32> = (0..44100 * 4)
///     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin() * 0.5)
///     .collect();
/// let clip = AudioBuffer::mono(44100, samples).unwrap();
///
/// let request = ProcessRequest::from_timecodes("00:01", "00:03", 0.0, 2.0, AudioFormat::Wav).unwrap();
/// let output = Pipeline::default().render(clip, &request).unwrap();
/// assert_eq!(output.len(), 44100);
/// ```
pub struct Pipeline {
    pitch: PitchShifter,
    stretcher: TimeStretcher,
    export_options: ExportOptions,
    encoder: Option<Arc<dyn Encoder>>,
    cancel: CancellationToken,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub(crate) fn from_parts(
        stretcher: TimeStretcher,
        export_options: ExportOptions,
        encoder: Option<Arc<dyn Encoder>>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            pitch: PitchShifter::with_stretcher(stretcher.clone()),
            stretcher,
            export_options,
            encoder,
            cancel,
        }
    }

    /// Token observed by every stage. Cancelling it aborts in-flight calls.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn export_options(&self) -> &ExportOptions {
        &self.export_options
    }

    /// Run the request and encode the result.
    pub fn process(&self, input: AudioBuffer, request: &ProcessRequest) -> Result<Vec<u8>> {
        self.process_with_progress(input, request, |_| {})
    }

    pub fn process_with_progress(
        &self,
        input: AudioBuffer,
        request: &ProcessRequest,
        on_progress: impl Fn(ProcessProgress),
    ) -> Result<Vec<u8>> {
        let started = Instant::now();
        let rendered = self.render_with_progress(input, request, &on_progress)?;

        on_progress(ProcessProgress {
            phase: ProcessPhase::Encoding,
            progress: 0.0,
        });
        self.check_cancelled()?;

        let options = self.export_options.clone().with_format(request.format);
        let bytes = clipshift_export::export(&rendered, &options, self.encoder.as_deref())?;

        on_progress(ProcessProgress {
            phase: ProcessPhase::Encoding,
            progress: 1.0,
        });
        info!(
            "Processed clip into {} bytes of {} in {:.1?}",
            bytes.len(),
            request.format.extension(),
            started.elapsed()
        );

        Ok(bytes)
    }

    /// Run the request without encoding.
    pub fn render(&self, input: AudioBuffer, request: &ProcessRequest) -> Result<AudioBuffer> {
        self.render_with_progress(input, request, |_| {})
    }

    pub fn render_with_progress(
        &self,
        input: AudioBuffer,
        request: &ProcessRequest,
        on_progress: impl Fn(ProcessProgress),
    ) -> Result<AudioBuffer> {
        // Parameters are rejected before any audio is touched
        request.validate()?;
        self.check_cancelled()?;

        let trimmed = self.stage(ProcessPhase::Trimming, &on_progress, || {
            let range = request.range.normalize(input.duration())?;
            // A whole-clip range passes the buffer through without a copy
            if range.start == 0.0 && range.end >= input.duration() {
                return Ok(input);
            }
            Ok(input.slice(range)?)
        })?;

        let shifted = self.stage(ProcessPhase::PitchShifting, &on_progress, || {
            Ok(self.pitch.process(trimmed, request.pitch, &self.cancel)?)
        })?;

        self.stage(ProcessPhase::TimeStretching, &on_progress, || {
            Ok(self.stretcher.process(shifted, request.speed, &self.cancel)?)
        })
    }

    fn stage(
        &self,
        phase: ProcessPhase,
        on_progress: &impl Fn(ProcessProgress),
        run: impl FnOnce() -> Result<AudioBuffer>,
    ) -> Result<AudioBuffer> {
        on_progress(ProcessProgress {
            phase,
            progress: 0.0,
        });

        let started = Instant::now();
        let output = run()?;
        debug!(
            "{:?}: {} frame(s) x {} channel(s) in {:.1?}",
            phase,
            output.len(),
            output.num_channels(),
            started.elapsed()
        );

        on_progress(ProcessProgress {
            phase,
            progress: 1.0,
        });
        self.check_cancelled()?;
        Ok(output)
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(DspError::Cancelled.into());
        }
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        PipelineBuilder::default().build()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("frame_spec", &self.stretcher.spec())
            .field("export_options", &self.export_options)
            .field("has_encoder", &self.encoder.is_some())
            .finish()
    }
}
