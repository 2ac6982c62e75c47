//! What to do to a clip.

use crate::Result;
use clipshift_core::{timecode, PitchParams, SpeedParams, TimeRange};
use clipshift_export::AudioFormat;

/// A complete edit: trim range, pitch shift, speed change and output format.
///
/// The default request is the identity edit (whole clip, no shift, normal
/// speed, WAV).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ProcessRequest {
    pub range: TimeRange,
    pub pitch: PitchParams,
    pub speed: SpeedParams,
    pub format: AudioFormat,
}

impl ProcessRequest {
    /// Build and validate a request.
    pub fn new(range: TimeRange, semitones: f32, rate: f32, format: AudioFormat) -> Result<Self> {
        Ok(Self {
            range,
            pitch: PitchParams::new(semitones)?,
            speed: SpeedParams::new(rate)?,
            format,
        })
    }

    /// Build a request from `MM:SS` start and end fields.
    ///
    /// Unparseable fields read as zero: a zero start is the clip start and a
    /// zero end is the clip end.
    ///
    /// ```
    /// use clipshift::{AudioFormat, ProcessRequest};
    ///
    /// let request = ProcessRequest::from_timecodes("00:02", "00:05", 0.0, 1.0, AudioFormat::Wav).unwrap();
    /// assert_eq!(request.range.start, 2.0);
    /// assert_eq!(request.range.end, 5.0);
    /// ```
    pub fn from_timecodes(
        start: &str,
        end: &str,
        semitones: f32,
        rate: f32,
        format: AudioFormat,
    ) -> Result<Self> {
        let range = TimeRange::new(timecode::parse(start), timecode::parse(end));
        Self::new(range, semitones, rate, format)
    }

    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_pitch(mut self, pitch: PitchParams) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_speed(mut self, speed: SpeedParams) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    /// Check the effect parameters. Ranges are checked against a clip later.
    pub fn validate(&self) -> Result<()> {
        self.pitch.validate()?;
        self.speed.validate()?;
        Ok(())
    }

    /// True when the request leaves the audio untouched.
    pub fn is_identity(&self) -> bool {
        self.range == TimeRange::full() && self.pitch.is_identity() && self.speed.is_identity()
    }
}
