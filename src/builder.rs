//! Builder for configuring and constructing a `Pipeline`.

use crate::Pipeline;
use clipshift_core::CancellationToken;
use clipshift_dsp::{FrameSpec, TimeStretcher};
use clipshift_export::{BitDepth, Encoder, ExportOptions};
use std::sync::Arc;

/// Everything is optional: the default pipeline uses 2048-sample frames,
/// writes 16-bit WAV at the clip's own sample rate and has no encoder for
/// compressed formats.
///
/// # Example
///
/// ```
/// use clipshift::prelude::*;
///
/// let cancel = CancellationToken::new();
/// let pipeline = Pipeline::builder()
///     .frame_spec(FrameSpec::new(4096).unwrap())
///     .bit_depth(BitDepth::Int24)
///     .cancellation_token(cancel.clone())
///     .build();
///
/// // Another thread may call `cancel.cancel()` to stop a running request
/// assert!(!pipeline.cancellation_token().is_cancelled());
/// ```
#[derive(Default)]
pub struct PipelineBuilder {
    frame_spec: FrameSpec,
    export_options: ExportOptions,
    encoder: Option<Arc<dyn Encoder>>,
    cancel: Option<CancellationToken>,
}

impl PipelineBuilder {
    /// Default: 2048-sample frames, hop 512
    pub fn frame_spec(mut self, spec: FrameSpec) -> Self {
        self.frame_spec = spec;
        self
    }

    /// Encoder for formats without a native writer (MP3).
    pub fn encoder(mut self, encoder: Arc<dyn Encoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Share a token with the caller so it can cancel running requests.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Replace all export options. The request's format still wins.
    pub fn export_options(mut self, options: ExportOptions) -> Self {
        self.export_options = options;
        self
    }

    /// Default: 16-bit
    pub fn bit_depth(mut self, bit_depth: BitDepth) -> Self {
        self.export_options.bit_depth = bit_depth;
        self
    }

    /// Resample on export. Default: keep the clip's rate.
    pub fn output_sample_rate(mut self, sample_rate: u32) -> Self {
        self.export_options.sample_rate = Some(sample_rate);
        self
    }

    /// Downmix to one channel on export.
    pub fn mono(mut self) -> Self {
        self.export_options.mono = true;
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline::from_parts(
            TimeStretcher::new(self.frame_spec),
            self.export_options,
            self.encoder,
            self.cancel.unwrap_or_default(),
        )
    }
}
