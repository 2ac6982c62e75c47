//! Frame layout shared by every spectral effect.

use crate::error::{Error, Result};
use std::f32::consts::PI;

/// Default FFT size for analysis/synthesis
pub const DEFAULT_FRAME_SIZE: usize = 2048;

/// STFT frame layout.
///
/// The hop is always a quarter frame (75% overlap) and the window is a
/// periodic Hann window of `frame_size` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct FrameSpec {
    frame_size: usize,
}

impl FrameSpec {
    /// Smallest accepted frame size
    pub const MIN_FRAME_SIZE: usize = 64;
    /// Largest accepted frame size
    pub const MAX_FRAME_SIZE: usize = 65536;

    /// Create a frame spec. `frame_size` must be a power of two in
    /// `MIN_FRAME_SIZE..=MAX_FRAME_SIZE`.
    pub fn new(frame_size: usize) -> Result<Self> {
        if !frame_size.is_power_of_two()
            || !(Self::MIN_FRAME_SIZE..=Self::MAX_FRAME_SIZE).contains(&frame_size)
        {
            return Err(Error::InvalidFrameSpec(format!(
                "frame size {} must be a power of two between {} and {}",
                frame_size,
                Self::MIN_FRAME_SIZE,
                Self::MAX_FRAME_SIZE
            )));
        }
        Ok(Self { frame_size })
    }

    #[inline]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    #[inline]
    pub fn hop_size(&self) -> usize {
        self.frame_size / 4
    }

    /// Bins in a real-input spectrum (DC through Nyquist).
    #[inline]
    pub fn num_bins(&self) -> usize {
        self.frame_size / 2 + 1
    }

    /// Frame length in seconds at `sample_rate`.
    pub fn duration_at(&self, sample_rate: u32) -> f64 {
        self.frame_size as f64 / sample_rate as f64
    }

    pub fn window(&self) -> Vec<f32> {
        hann_window(self.frame_size)
    }
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
        }
    }
}

/// Periodic Hann window.
pub fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / size as f32).cos()))
        .collect()
}

/// One analysed frame of one channel: magnitude and phase per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFrame {
    pub magnitude: Vec<f32>,
    pub phase: Vec<f32>,
}

impl SpectralFrame {
    pub fn silent(num_bins: usize) -> Self {
        Self {
            magnitude: vec![0.0; num_bins],
            phase: vec![0.0; num_bins],
        }
    }

    pub fn num_bins(&self) -> usize {
        self.magnitude.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec() {
        let spec = FrameSpec::default();
        assert_eq!(spec.frame_size(), 2048);
        assert_eq!(spec.hop_size(), 512);
        assert_eq!(spec.num_bins(), 1025);
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert!(FrameSpec::new(1000).is_err());
        assert!(FrameSpec::new(32).is_err());
        assert!(FrameSpec::new(1 << 17).is_err());
        assert!(FrameSpec::new(4096).is_ok());
    }

    #[test]
    fn test_hann_window() {
        let window = hann_window(1024);
        assert_eq!(window.len(), 1024);

        assert!(window[0] < 0.001);
        assert!((window[512] - 1.0).abs() < 0.001);
        // Periodic: symmetric around the centre, last sample not zero
        assert!((window[1] - window[1023]).abs() < 1e-6);
    }

    #[test]
    fn test_squared_window_overlap_is_constant() {
        // Periodic Hann at 75% overlap sums w^2 to 1.5
        let spec = FrameSpec::new(256).unwrap();
        let window = spec.window();
        let hop = spec.hop_size();
        for n in 0..hop {
            let sum: f32 = (0..4).map(|k| window[n + k * hop].powi(2)).sum();
            assert!((sum - 1.5).abs() < 1e-4, "sum at {} was {}", n, sum);
        }
    }
}
