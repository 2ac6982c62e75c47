//! Command-line clip editor
//!
//! Usage: `clipshift <input.wav> <output.wav> [start MM:SS] [end MM:SS] [semitones] [rate]`
//!
//! Only WAV is written. MP3 output needs an [`Encoder`] registered through
//! `PipelineBuilder::encoder`, which this tool does not have.

use clipshift::prelude::*;
use std::env;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: clipshift <input.wav> <output.wav> [start MM:SS] [end MM:SS] [semitones] [rate]";

struct Args {
    input: String,
    output: String,
    start: String,
    end: String,
    semitones: f32,
    rate: f32,
}

fn parse_args() -> Option<Args> {
    let mut args = env::args().skip(1);
    let input = args.next()?;
    let output = args.next()?;
    let start = args.next().unwrap_or_default();
    let end = args.next().unwrap_or_default();
    let semitones = match args.next() {
        Some(s) => s.parse().ok()?,
        None => 0.0,
    };
    let rate = match args.next() {
        Some(r) => r.parse().ok()?,
        None => 1.0,
    };

    Some(Args {
        input,
        output,
        start,
        end,
        semitones,
        rate,
    })
}

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
}

/// Output format from the file name. Rejected before any decoding happens.
fn output_format(path: &str) -> Result<AudioFormat> {
    use clipshift::export::ExportError;

    match AudioFormat::from_extension(extension(path)) {
        Some(format) if format.is_native() => Ok(format),
        Some(format) => Err(ExportError::UnsupportedFormat(format!(
            "{} output needs an encoder; clipshift writes {} only",
            format.extension(),
            AudioFormat::Wav.extension()
        ))
        .into()),
        None => Err(ExportError::UnsupportedFormat(format!(
            "cannot infer output format from {}",
            path
        ))
        .into()),
    }
}

fn run(args: Args) -> Result<()> {
    let format = output_format(&args.output)?;
    let request =
        ProcessRequest::from_timecodes(&args.start, &args.end, args.semitones, args.rate, format)?;

    let bytes = std::fs::read(&args.input)?;
    let hint = ContainerHint::from_extension(extension(&args.input));
    let clip = WavDecoder.decode(&bytes, hint)?;
    tracing::info!(
        "Loaded {} ({} channel(s), {} Hz, {})",
        args.input,
        clip.num_channels(),
        clip.sample_rate(),
        timecode::format(clip.duration())
    );

    let pipeline = Pipeline::default();
    let encoded = pipeline.process_with_progress(clip, &request, |p| {
        if p.progress == 0.0 {
            tracing::info!("{:?}...", p.phase);
        }
    })?;

    std::fs::write(&args.output, &encoded)?;
    tracing::info!("Wrote {} ({} bytes)", args.output, encoded.len());
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(args) = parse_args() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            match e.category() {
                ErrorCategory::InvalidInput => ExitCode::from(2),
                ErrorCategory::ProcessingFailure => ExitCode::FAILURE,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_wav() {
        assert_eq!(output_format("edit.wav").unwrap(), AudioFormat::Wav);
        assert_eq!(output_format("EDIT.WAV").unwrap(), AudioFormat::Wav);
    }

    #[test]
    fn test_output_format_mp3_needs_encoder() {
        let err = output_format("edit.mp3").unwrap_err();
        assert!(err.to_string().contains("needs an encoder"), "{}", err);
        assert!(!USAGE.contains("mp3"));
    }

    #[test]
    fn test_output_format_unknown() {
        assert!(output_format("edit.flac").is_err());
        assert!(output_format("edit").is_err());
    }
}
