//! # clipshift Export
//!
//! Turns a processed [`AudioBuffer`] into file bytes:
//! - **WAV**: encoded natively via hound (16-bit, 24-bit, 32-bit float)
//! - **MP3**: handed to a caller-supplied [`Encoder`]
//! - **Conversion**: optional mono downmix and sample-rate change via rubato
//!
//! ## Example
//!
//! ```rust
//! use clipshift_core::AudioBuffer;
//! use clipshift_export::{export, ExportOptions};
//!
//! let buffer = AudioBuffer::mono(44100, vec![0.0; 4410]).unwrap();
//! let bytes = export(&buffer, &ExportOptions::default(), None).unwrap();
//! assert_eq!(&bytes[0..4], b"RIFF");
//! ```
//!
//! ## Feature Flags
//!
//! - `wav` (default): WAV export via hound (pure Rust)
//! - `serialization`: serde derives on option types

pub mod error;
mod encoder;
mod options;

pub mod dsp;
pub mod format;

pub use dsp::ResampleQuality;
pub use encoder::Encoder;
pub use error::{ExportError, Result};
pub use options::{AudioFormat, BitDepth, ExportOptions};

use clipshift_core::AudioBuffer;
use std::borrow::Cow;

/// Encode `buffer` according to `options`.
///
/// Mono downmix and resampling run first. WAV is written natively; any other
/// format goes to `encoder`, and fails with [`ExportError::Encoding`] when
/// none is supplied or it does not handle the format.
pub fn export(
    buffer: &AudioBuffer,
    options: &ExportOptions,
    encoder: Option<&dyn Encoder>,
) -> Result<Vec<u8>> {
    let prepared = prepare(buffer, options)?;

    log::debug!(
        "Exporting {} frame(s), {} channel(s) at {} Hz as {}",
        prepared.len(),
        prepared.num_channels(),
        prepared.sample_rate(),
        options.format.extension()
    );

    match options.format {
        AudioFormat::Wav => encode_wav(&prepared, options),
        format => match encoder {
            Some(encoder) if encoder.supports(format) => {
                let bytes = encoder.encode(&prepared, format)?;
                log::debug!("External encoder produced {} bytes", bytes.len());
                Ok(bytes)
            }
            Some(_) => Err(ExportError::Encoding(format!(
                "Registered encoder does not support {}",
                format.extension()
            ))),
            None => Err(ExportError::Encoding(format!(
                "No encoder registered for {}",
                format.extension()
            ))),
        },
    }
}

/// Apply the mono and sample-rate options.
fn prepare<'a>(buffer: &'a AudioBuffer, options: &ExportOptions) -> Result<Cow<'a, AudioBuffer>> {
    let mut prepared = Cow::Borrowed(buffer);

    if options.mono && prepared.num_channels() > 1 {
        prepared = Cow::Owned(prepared.to_mono());
    }

    if let Some(target_rate) = options.sample_rate {
        if options.needs_resampling(prepared.sample_rate()) {
            log::debug!(
                "Resampling {} Hz -> {} Hz ({:?})",
                prepared.sample_rate(),
                target_rate,
                options.resample_quality
            );
            prepared = Cow::Owned(dsp::resample_buffer(
                &prepared,
                target_rate,
                options.resample_quality,
            )?);
        }
    }

    Ok(prepared)
}

#[allow(unused_variables)]
fn encode_wav(buffer: &AudioBuffer, options: &ExportOptions) -> Result<Vec<u8>> {
    #[cfg(feature = "wav")]
    {
        let config = format::wav::WavConfig::for_buffer(buffer, options.bit_depth)?;
        format::wav::encode_wav_memory(buffer, &config)
    }
    #[cfg(not(feature = "wav"))]
    {
        Err(ExportError::UnsupportedFormat(
            "WAV support not enabled".into(),
        ))
    }
}

#[cfg(all(test, feature = "wav"))]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct TagEncoder;

    impl Encoder for TagEncoder {
        fn encode(&self, buffer: &AudioBuffer, format: AudioFormat) -> Result<Vec<u8>> {
            let mut bytes = format.extension().as_bytes().to_vec();
            bytes.extend_from_slice(&(buffer.len() as u32).to_le_bytes());
            Ok(bytes)
        }
    }

    struct WavOnlyEncoder;

    impl Encoder for WavOnlyEncoder {
        fn encode(&self, _: &AudioBuffer, _: AudioFormat) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        fn supports(&self, format: AudioFormat) -> bool {
            format == AudioFormat::Wav
        }
    }

    fn stereo() -> AudioBuffer {
        AudioBuffer::new(44100, vec![vec![0.5; 100], vec![-0.5; 100]]).unwrap()
    }

    #[test]
    fn test_default_export_is_wav() {
        let bytes = export(&stereo(), &ExportOptions::default(), None).unwrap();
        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.spec().sample_rate, 44100);
        assert_eq!(reader.duration(), 100);
    }

    #[test]
    fn test_wav_ignores_encoder() {
        let with = export(&stereo(), &ExportOptions::default(), Some(&TagEncoder)).unwrap();
        let without = export(&stereo(), &ExportOptions::default(), None).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_mono_downmix() {
        let options = ExportOptions {
            mono: true,
            ..Default::default()
        };
        let bytes = export(&stereo(), &options, None).unwrap();
        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert!(reader.samples::<i16>().all(|s| s.unwrap() == 0));
    }

    #[test]
    fn test_resample_on_export() {
        let options = ExportOptions {
            sample_rate: Some(22050),
            ..Default::default()
        };
        let bytes = export(&stereo(), &options, None).unwrap();
        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, 22050);
        assert_eq!(reader.duration(), 50);
    }

    #[test]
    fn test_mp3_uses_encoder() {
        let options = ExportOptions::default().with_format(AudioFormat::Mp3);
        let bytes = export(&stereo(), &options, Some(&TagEncoder)).unwrap();
        assert_eq!(&bytes[..3], b"mp3");
        assert_eq!(&bytes[3..], &100u32.to_le_bytes());
    }

    #[test]
    fn test_mp3_without_encoder_fails() {
        let options = ExportOptions::default().with_format(AudioFormat::Mp3);
        assert!(matches!(
            export(&stereo(), &options, None),
            Err(ExportError::Encoding(_))
        ));
        assert!(matches!(
            export(&stereo(), &options, Some(&WavOnlyEncoder)),
            Err(ExportError::Encoding(_))
        ));
    }
}
