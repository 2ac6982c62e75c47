//! Pitch and speed parameters.
//!
//! ## Range Limits
//!
//! - `semitones`: -12 to +12 (one octave either way)
//! - `rate`: 0.2 to 2.0 (fifth speed to double speed)
//!
//! Out-of-range values are rejected rather than clamped so a typo in a
//! request never silently turns into a different edit.

use crate::error::{Error, Result};

/// Pitch shift in semitones. Zero leaves the audio untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PitchParams {
    pub semitones: f32,
}

impl PitchParams {
    /// Lowest accepted shift (one octave down)
    pub const MIN_SEMITONES: f32 = -12.0;
    /// Highest accepted shift (one octave up)
    pub const MAX_SEMITONES: f32 = 12.0;

    /// Create validated pitch parameters.
    pub fn new(semitones: f32) -> Result<Self> {
        let params = Self { semitones };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !(Self::MIN_SEMITONES..=Self::MAX_SEMITONES).contains(&self.semitones) {
            return Err(Error::InvalidParameter(format!(
                "semitones {} outside [{}, {}]",
                self.semitones,
                Self::MIN_SEMITONES,
                Self::MAX_SEMITONES
            )));
        }
        Ok(())
    }

    /// Frequency ratio `2^(semitones / 12)`.
    pub fn ratio(&self) -> f64 {
        2.0_f64.powf(self.semitones as f64 / 12.0)
    }

    pub fn is_identity(&self) -> bool {
        self.semitones == 0.0
    }
}

/// Playback rate. Above 1.0 plays faster (shorter), below 1.0 slower.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SpeedParams {
    pub rate: f32,
}

impl SpeedParams {
    /// Slowest accepted rate (1/5 speed)
    pub const MIN_RATE: f32 = 0.2;
    /// Fastest accepted rate (2x speed)
    pub const MAX_RATE: f32 = 2.0;

    /// Create validated speed parameters.
    pub fn new(rate: f32) -> Result<Self> {
        let params = Self { rate };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !(Self::MIN_RATE..=Self::MAX_RATE).contains(&self.rate) {
            return Err(Error::InvalidParameter(format!(
                "rate {} outside [{}, {}]",
                self.rate,
                Self::MIN_RATE,
                Self::MAX_RATE
            )));
        }
        Ok(())
    }

    pub fn is_identity(&self) -> bool {
        self.rate == 1.0
    }
}

impl Default for SpeedParams {
    fn default() -> Self {
        Self { rate: 1.0 }
    }
}
