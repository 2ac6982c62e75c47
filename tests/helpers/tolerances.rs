//! Tolerance constants for clip processing tests.

/// Floating point rounding errors (pass-through, trimming).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// 16-bit quantization step size.
/// Use when comparing against WAV bytes read back at the default bit depth.
pub const INT16_EPSILON: f32 = 1.0 / 32768.0;

/// Allowed dominant-frequency error in Hz after pitch or speed changes.
/// Under half a bin of the default 2048-sample analysis frame at 44.1 kHz.
pub const PITCH_TOLERANCE_HZ: f32 = 10.0;

/// Minimum RMS of processed test tones (amplitude 0.5 sine has RMS ~0.354).
pub const MIN_TONE_RMS: f32 = 0.2;
