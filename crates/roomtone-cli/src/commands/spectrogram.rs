//! Spectrogram export command.

use super::common::{AnalysisOptions, load_recording};
use clap::{Args, ValueEnum};
use roomtone_analysis::export::{export_spectrogram_csv, export_spectrogram_pgm};
use roomtone_analysis::spectrogram;
use std::path::{Path, PathBuf};

/// Output encodings for the spectrogram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SpectrogramFormat {
    /// Comma-separated values, frames on rows
    Csv,
    /// Grayscale image, time along X and frequency along Y
    Pgm,
}

impl SpectrogramFormat {
    /// Guess from the output extension; CSV unless it ends in `.pgm`.
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pgm") => Self::Pgm,
            _ => Self::Csv,
        }
    }
}

#[derive(Args)]
pub struct SpectrogramArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Output format (default from the output extension)
    #[arg(long, value_enum)]
    format: Option<SpectrogramFormat>,

    /// Dynamic range below the maximum in dB
    #[arg(long, default_value = "80.0")]
    db_range: f32,

    /// Write linear power instead of dB to CSV
    #[arg(long)]
    linear: bool,

    #[command(flatten)]
    options: AnalysisOptions,
}

pub fn run(args: SpectrogramArgs) -> anyhow::Result<()> {
    if !(args.db_range.is_finite() && args.db_range > 0.0) {
        anyhow::bail!("--db-range must be positive, got {}", args.db_range);
    }

    let config = args.options.config()?;
    let buffer = load_recording(&args.input)?;
    let spec = spectrogram::transform_with(&buffer, &config)?;

    println!(
        "Spectrogram of {}: {} frames x {} bins",
        args.input.display(),
        spec.num_frames(),
        spec.num_bins()
    );

    let format = args
        .format
        .unwrap_or_else(|| SpectrogramFormat::from_path(&args.output));
    match format {
        SpectrogramFormat::Csv => export_spectrogram_csv(&spec, &args.output, !args.linear)?,
        SpectrogramFormat::Pgm => export_spectrogram_pgm(&spec, &args.output, args.db_range)?,
    }

    println!("Wrote {}", args.output.display());
    Ok(())
}
