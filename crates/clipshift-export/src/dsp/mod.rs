//! DSP utilities for audio export.

mod resample;

pub use resample::{resample_buffer, ResampleQuality};
