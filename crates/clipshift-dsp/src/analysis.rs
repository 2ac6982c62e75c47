//! Spectral peak and level measurement.
//!
//! Used to check what an edit actually did to a clip: a shift of `n`
//! semitones should move the dominant peak by `2^(n/12)`, and neither edit
//! should change the level of a steady tone.

use crate::frame::hann_window;
use rustfft::{num_complex::Complex, FftPlanner};

/// Largest FFT used for peak measurement
const MAX_ANALYSIS_SIZE: usize = 65536;

/// Smallest signal worth measuring
const MIN_ANALYSIS_SIZE: usize = 64;

/// Frequency in Hz of the strongest spectral peak.
///
/// Analyses one Hann-windowed block (the largest power of two that fits, up
/// to 65536 samples) taken from the middle of `samples`, and refines the peak
/// bin with parabolic interpolation. Returns `None` for signals shorter than
/// 64 samples or with no energy.
pub fn dominant_frequency(samples: &[f32], sample_rate: u32) -> Option<f32> {
    if samples.len() < MIN_ANALYSIS_SIZE || sample_rate == 0 {
        return None;
    }

    let size = prev_power_of_two(samples.len()).min(MAX_ANALYSIS_SIZE);
    let offset = (samples.len() - size) / 2;
    let window = hann_window(size);

    let mut buffer: Vec<Complex<f32>> = samples[offset..offset + size]
        .iter()
        .zip(window.iter())
        .map(|(s, w)| Complex::new(s * w, 0.0))
        .collect();

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(size).process(&mut buffer);

    let magnitudes: Vec<f32> = buffer[..size / 2 + 1].iter().map(|c| c.norm()).collect();

    // Skip DC
    let (peak, &peak_mag) = magnitudes
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.total_cmp(b.1))?;
    if peak_mag <= f32::EPSILON {
        return None;
    }

    let bin = parabolic_interpolation(&magnitudes, peak);
    Some((bin * sample_rate as f64 / size as f64) as f32)
}

/// Root-mean-square level. Zero for an empty slice.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / samples.len() as f64).sqrt() as f32
}

/// Largest absolute sample of each whole `block_size` block.
///
/// A trailing partial block is ignored.
pub fn block_peaks(samples: &[f32], block_size: usize) -> Vec<f32> {
    if block_size == 0 {
        return Vec::new();
    }
    samples
        .chunks_exact(block_size)
        .map(|block| block.iter().fold(0.0f32, |peak, s| peak.max(s.abs())))
        .collect()
}

fn prev_power_of_two(n: usize) -> usize {
    if n.is_power_of_two() {
        n
    } else {
        n.next_power_of_two() / 2
    }
}

/// Fits a parabola through the peak and its neighbours and returns the vertex.
fn parabolic_interpolation(magnitudes: &[f32], peak: usize) -> f64 {
    if peak < 1 || peak + 1 >= magnitudes.len() {
        return peak as f64;
    }

    let s0 = magnitudes[peak - 1] as f64;
    let s1 = magnitudes[peak] as f64;
    let s2 = magnitudes[peak + 1] as f64;

    let denominator = 2.0 * (2.0 * s1 - s2 - s0);
    if denominator.abs() > 1e-10 {
        peak as f64 + (s2 - s0) / denominator
    } else {
        peak as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(freq: f32, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_detects_sine() {
        for freq in [110.0, 440.0, 880.0, 3520.0] {
            let detected = dominant_frequency(&sine(freq, 44100, 44100), 44100).unwrap();
            assert!((detected - freq).abs() < 1.0, "{} detected as {}", freq, detected);
        }
    }

    #[test]
    fn test_too_short_or_silent() {
        assert!(dominant_frequency(&[0.5; 10], 44100).is_none());
        assert!(dominant_frequency(&[0.0; 4096], 44100).is_none());
    }

    #[test]
    fn test_rms_of_sine() {
        let level = rms(&sine(440.0, 44100, 44100));
        assert!((level - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-3);
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn test_block_peaks() {
        let samples = [0.1, -0.5, 0.2, 0.3, -0.1, 0.0, 0.9];
        assert_eq!(block_peaks(&samples, 3), vec![0.5, 0.3]);
        assert!(block_peaks(&samples, 0).is_empty());
        assert!(block_peaks(&samples[..2], 3).is_empty());
    }

    #[test]
    fn test_prev_power_of_two() {
        assert_eq!(prev_power_of_two(4096), 4096);
        assert_eq!(prev_power_of_two(5000), 4096);
        assert_eq!(prev_power_of_two(132300), 131072);
    }
}
