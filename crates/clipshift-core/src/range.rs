//! Trim ranges.

use crate::error::{Error, Result};

/// A time range in seconds, `start` inclusive and `end` exclusive.
///
/// A range is a plain value until it meets a buffer: [`TimeRange::normalize`]
/// fits it to a clip duration and is the only place a range is checked.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TimeRange {
    /// Start position in seconds
    pub start: f64,
    /// End position in seconds (non-positive means "end of clip")
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Range covering a whole clip, whatever its duration.
    pub fn full() -> Self {
        Self { start: 0.0, end: 0.0 }
    }

    /// Fit the range to a clip of `duration` seconds.
    ///
    /// An `end` that is non-positive, non-finite or past the clip becomes the
    /// clip duration, and a negative `start` becomes zero. Whatever remains
    /// must satisfy `start < end`.
    pub fn normalize(self, duration: f64) -> Result<Self> {
        let end = if !self.end.is_finite() || self.end <= 0.0 || self.end > duration {
            duration
        } else {
            self.end
        };
        // f64::max drops NaN, so an unparseable start also lands on zero
        let start = self.start.max(0.0);

        if start >= end {
            return Err(Error::InvalidRange { start, end });
        }

        Ok(Self { start, end })
    }

    /// Length in seconds.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_valid_range() {
        let range = TimeRange::new(2.0, 5.0).normalize(10.0).unwrap();
        assert_eq!(range, TimeRange::new(2.0, 5.0));
        assert_eq!(range.length(), 3.0);
    }

    #[test]
    fn test_normalize_end_of_clip() {
        assert_eq!(TimeRange::full().normalize(8.0).unwrap().end, 8.0);
        assert_eq!(TimeRange::new(1.0, -3.0).normalize(8.0).unwrap().end, 8.0);
        assert_eq!(TimeRange::new(1.0, 60.0).normalize(8.0).unwrap().end, 8.0);
    }

    #[test]
    fn test_normalize_negative_start() {
        let range = TimeRange::new(-2.0, 4.0).normalize(8.0).unwrap();
        assert_eq!(range.start, 0.0);
    }

    #[test]
    fn test_normalize_rejects_inverted_range() {
        let err = TimeRange::new(5.0, 2.0).normalize(10.0).unwrap_err();
        assert_eq!(err, Error::InvalidRange { start: 5.0, end: 2.0 });

        // Start past the clip: end is clamped first, then the check fails
        assert!(TimeRange::new(12.0, 20.0).normalize(10.0).is_err());
        assert!(TimeRange::new(3.0, 3.0).normalize(10.0).is_err());
    }

    #[test]
    fn test_normalize_empty_clip() {
        assert!(TimeRange::full().normalize(0.0).is_err());
    }
}
