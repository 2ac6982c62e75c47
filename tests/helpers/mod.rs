//! Test helpers and fixtures for clipshift integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (pass-through, trimming)
//! - `INT16_EPSILON`: One 16-bit quantization step (WAV read-back)
//! - `PITCH_TOLERANCE_HZ`: Dominant-frequency checks after processing

#![allow(dead_code)]

pub mod tolerances;

use clipshift::prelude::*;
use std::io::Cursor;

/// Default test sample rate
pub const TEST_SAMPLE_RATE: u32 = 44100;

/// Amplitude of generated test tones (leaves headroom for resynthesis)
pub const TEST_AMPLITUDE: f32 = 0.5;

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            ((2.0 * std::f64::consts::PI * frequency * t).sin() as f32) * TEST_AMPLITUDE
        })
        .collect()
}

/// Generate white noise (random samples in -1..1).
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    // Simple LCG for reproducible "random" noise
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((rng >> 33) as f32 / u32::MAX as f32) * 2.0 - 1.0
        })
        .collect()
}

/// Mono sine clip at [`TEST_SAMPLE_RATE`].
pub fn sine_clip(frequency: f64, seconds: f64) -> AudioBuffer {
    let len = (seconds * TEST_SAMPLE_RATE as f64).round() as usize;
    AudioBuffer::mono(TEST_SAMPLE_RATE, generate_sine(frequency, TEST_SAMPLE_RATE, len))
        .expect("valid test clip")
}

/// Stereo clip with a different tone on each side.
pub fn stereo_clip(left_hz: f64, right_hz: f64, seconds: f64) -> AudioBuffer {
    let len = (seconds * TEST_SAMPLE_RATE as f64).round() as usize;
    AudioBuffer::new(
        TEST_SAMPLE_RATE,
        vec![
            generate_sine(left_hz, TEST_SAMPLE_RATE, len),
            generate_sine(right_hz, TEST_SAMPLE_RATE, len),
        ],
    )
    .expect("valid test clip")
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// Header and samples of an exported WAV file.
pub fn read_wav(bytes: &[u8]) -> (hound::WavSpec, AudioBuffer) {
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).expect("valid WAV bytes");
    let spec = reader.spec();
    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().map(|s| s.unwrap()).collect(),
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.unwrap() as f32 * scale)
                .collect()
        }
    };
    let buffer =
        AudioBuffer::from_interleaved(spec.sample_rate, spec.channels as usize, &interleaved)
            .expect("consistent WAV layout");
    (spec, buffer)
}

/// Assert the strongest spectral peak of `samples` sits at `expected` Hz.
pub fn assert_dominant_frequency(samples: &[f32], sample_rate: u32, expected: f32, tolerance: f32) {
    let measured = clipshift::dsp::dominant_frequency(samples, sample_rate)
        .expect("signal has a spectral peak");
    assert!(
        (measured - expected).abs() <= tolerance,
        "Expected dominant frequency {} Hz (+/- {}), measured {} Hz",
        expected,
        tolerance,
        measured
    );
}

/// Assert that a signal has content (not silent).
pub fn assert_has_audio(samples: &[f32], min_rms: f32) {
    let r = rms(samples);
    assert!(
        r >= min_rms,
        "Expected audio content with RMS >= {}, but RMS was {}",
        min_rms,
        r
    );
}

/// Duration of one analysis frame of the default frame spec.
pub fn frame_duration(sample_rate: u32) -> f64 {
    FrameSpec::default().duration_at(sample_rate)
}
