//! Export options.

use crate::dsp::ResampleQuality;

/// Output container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum AudioFormat {
    /// Uncompressed RIFF/WAVE, written natively.
    #[default]
    Wav,
    /// MPEG-1 Layer III, handed to an external [`Encoder`](crate::Encoder).
    Mp3,
}

impl AudioFormat {
    /// File extension (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
        }
    }

    /// Suggested download name for an edited clip.
    pub fn default_file_name(&self) -> String {
        format!("edited_audio.{}", self.extension())
    }

    /// Whether this crate encodes the format itself.
    pub fn is_native(&self) -> bool {
        matches!(self, AudioFormat::Wav)
    }

    /// Format for a file extension (case-insensitive, without dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" | "wave" => Some(AudioFormat::Wav),
            "mp3" => Some(AudioFormat::Mp3),
            _ => None,
        }
    }
}

/// Bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum BitDepth {
    #[default]
    Int16,
    Int24,
    Float32,
}

impl BitDepth {
    /// Bits per sample.
    pub fn bits(&self) -> u16 {
        match self {
            BitDepth::Int16 => 16,
            BitDepth::Int24 => 24,
            BitDepth::Float32 => 32,
        }
    }
}

/// Export options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ExportOptions {
    /// Audio format.
    pub format: AudioFormat,
    /// Bit depth (WAV only).
    pub bit_depth: BitDepth,
    /// Target sample rate (None = keep the buffer's rate).
    pub sample_rate: Option<u32>,
    /// Resampling quality.
    pub resample_quality: ResampleQuality,
    /// Export as mono.
    pub mono: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: AudioFormat::Wav,
            bit_depth: BitDepth::Int16,
            sample_rate: None,
            resample_quality: ResampleQuality::Medium,
            mono: false,
        }
    }
}

impl ExportOptions {
    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    /// Effective output sample rate for a buffer at `source_rate`.
    pub fn output_sample_rate(&self, source_rate: u32) -> u32 {
        self.sample_rate.unwrap_or(source_rate)
    }

    /// Whether resampling is needed.
    pub fn needs_resampling(&self, source_rate: u32) -> bool {
        self.sample_rate
            .map(|r| r != source_rate)
            .unwrap_or(false)
    }
}
