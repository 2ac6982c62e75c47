//! Decoded audio held in memory.

use crate::error::{Error, Result};
use crate::range::TimeRange;

/// Planar floating-point audio.
///
/// Every channel holds the same number of samples. A buffer is never mutated
/// once built: processing stages take one buffer and hand back a new one.
///
/// Samples are nominally in `[-1.0, 1.0]`. The range is not enforced here;
/// pitch and speed edits may overshoot it, and the WAV writer clamps when it
/// quantizes to 16 or 24 bits. 32-bit float export keeps samples as they are.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Create a buffer from planar channel data.
    ///
    /// Fails if the sample rate is zero, there are no channels, or the
    /// channels differ in length.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::InvalidBuffer("Sample rate must be positive".into()));
        }
        if channels.is_empty() {
            return Err(Error::InvalidBuffer("At least one channel required".into()));
        }
        let len = channels[0].len();
        if channels.iter().any(|c| c.len() != len) {
            return Err(Error::InvalidBuffer(
                "All channels must have the same length".into(),
            ));
        }

        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Create a single-channel buffer.
    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Result<Self> {
        Self::new(sample_rate, vec![samples])
    }

    /// Create a buffer from interleaved frames `[c0, c1, .., c0, c1, ..]`.
    pub fn from_interleaved(sample_rate: u32, num_channels: usize, samples: &[f32]) -> Result<Self> {
        if num_channels == 0 {
            return Err(Error::InvalidBuffer("At least one channel required".into()));
        }
        if samples.len() % num_channels != 0 {
            return Err(Error::InvalidBuffer(format!(
                "{} interleaved samples do not divide into {} channels",
                samples.len(),
                num_channels
            )));
        }

        let frames = samples.len() / num_channels;
        let mut channels = vec![Vec::with_capacity(frames); num_channels];
        for frame in samples.chunks_exact(num_channels) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }

        Self::new(sample_rate, channels)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    /// Interleaved frames `[c0, c1, .., c0, c1, ..]`.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.len() * self.num_channels());
        for i in 0..self.len() {
            for channel in &self.channels {
                result.push(channel[i]);
            }
        }
        result
    }

    /// Average all channels into one.
    pub fn to_mono(&self) -> Self {
        if self.num_channels() == 1 {
            return self.clone();
        }

        let scale = 1.0 / self.num_channels() as f32;
        let mono = (0..self.len())
            .map(|i| self.channels.iter().map(|c| c[i]).sum::<f32>() * scale)
            .collect();

        Self {
            sample_rate: self.sample_rate,
            channels: vec![mono],
        }
    }

    /// True when no sample is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.channels.iter().flatten().all(|s| s.is_finite())
    }

    /// Copy out the samples covered by `range`.
    ///
    /// `start` rounds down to a sample index and `end` rounds down then clamps
    /// to the buffer length. An empty selection is an [`Error::InvalidRange`];
    /// ranges are not repaired here (see [`TimeRange::normalize`]).
    pub fn slice(&self, range: TimeRange) -> Result<Self> {
        let sr = self.sample_rate as f64;
        let start_sample = (range.start.max(0.0) * sr).floor() as usize;
        let end_sample = ((range.end.max(0.0) * sr).floor() as usize).min(self.len());

        if start_sample >= end_sample {
            return Err(Error::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }

        Ok(Self {
            sample_rate: self.sample_rate,
            channels: self
                .channels
                .iter()
                .map(|c| c[start_sample..end_sample].to_vec())
                .collect(),
        })
    }

    /// Build a buffer at this buffer's sample rate from already-validated
    /// channel data. Used by processing stages that preserve channel count.
    pub fn with_channels(&self, channels: Vec<Vec<f32>>) -> Result<Self> {
        Self::new(self.sample_rate, channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| i as f32 / len as f32).collect()
    }

    #[test]
    fn test_new_rejects_bad_layout() {
        assert!(AudioBuffer::new(0, vec![vec![0.0]]).is_err());
        assert!(AudioBuffer::new(44100, vec![]).is_err());
        assert!(AudioBuffer::new(44100, vec![vec![0.0; 4], vec![0.0; 3]]).is_err());
    }

    #[test]
    fn test_out_of_range_samples_kept() {
        let buffer = AudioBuffer::mono(44100, vec![1.5, -2.0, 0.25]).unwrap();
        assert_eq!(buffer.channel(0).unwrap(), &[1.5, -2.0, 0.25]);
        assert!(buffer.is_finite());
    }

    #[test]
    fn test_empty_buffer_is_valid() {
        let buffer = AudioBuffer::mono(44100, Vec::new()).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.duration(), 0.0);
    }

    #[test]
    fn test_duration() {
        let buffer = AudioBuffer::mono(48000, vec![0.0; 24000]).unwrap();
        assert_relative_eq!(buffer.duration(), 0.5);
    }

    #[test]
    fn test_interleave_round_trip() {
        let samples = vec![0.1, -0.1, 0.2, -0.2, 0.3, -0.3];
        let buffer = AudioBuffer::from_interleaved(44100, 2, &samples).unwrap();
        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.channel(0).unwrap(), &[0.1, 0.2, 0.3]);
        assert_eq!(buffer.channel(1).unwrap(), &[-0.1, -0.2, -0.3]);
        assert_eq!(buffer.interleaved(), samples);

        assert!(AudioBuffer::from_interleaved(44100, 2, &samples[..5]).is_err());
    }

    #[test]
    fn test_to_mono() {
        let buffer = AudioBuffer::new(44100, vec![vec![1.0, 0.5], vec![0.0, -0.5]]).unwrap();
        let mono = buffer.to_mono();
        assert_eq!(mono.num_channels(), 1);
        assert_eq!(mono.channel(0).unwrap(), &[0.5, 0.0]);
    }

    #[test]
    fn test_slice_sample_positions() {
        let buffer = AudioBuffer::mono(10, ramp(100)).unwrap();
        let slice = buffer.slice(TimeRange::new(2.05, 5.0)).unwrap();
        // floor(20.5) = 20, floor(50.0) = 50
        assert_eq!(slice.len(), 30);
        assert_eq!(slice.channel(0).unwrap()[0], buffer.channel(0).unwrap()[20]);
        assert_eq!(slice.sample_rate(), 10);
    }

    #[test]
    fn test_slice_clamps_end() {
        let buffer = AudioBuffer::mono(10, ramp(100)).unwrap();
        let slice = buffer.slice(TimeRange::new(8.0, 50.0)).unwrap();
        assert_eq!(slice.len(), 20);
    }

    #[test]
    fn test_slice_duration_within_one_sample() {
        let sr = 44100;
        let buffer = AudioBuffer::mono(sr, vec![0.0; sr as usize * 4]).unwrap();
        for (a, b) in [(0.0, 1.0), (0.123, 2.5), (1.99999, 3.00001), (3.5, 4.0)] {
            let slice = buffer.slice(TimeRange::new(a, b)).unwrap();
            assert!((slice.duration() - (b - a)).abs() <= 1.0 / sr as f64);
        }
    }

    #[test]
    fn test_slice_empty_selection_is_error() {
        let buffer = AudioBuffer::mono(10, ramp(100)).unwrap();
        assert!(matches!(
            buffer.slice(TimeRange::new(5.0, 5.05)),
            Err(Error::InvalidRange { .. })
        ));
        assert!(buffer.slice(TimeRange::new(20.0, 30.0)).is_err());
    }

    #[test]
    fn test_is_finite() {
        let good = AudioBuffer::mono(10, vec![0.0, 1.0]).unwrap();
        let bad = AudioBuffer::mono(10, vec![0.0, f32::NAN]).unwrap();
        assert!(good.is_finite());
        assert!(!bad.is_finite());
    }
}
