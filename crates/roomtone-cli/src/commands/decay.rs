//! Decay reference points per band.

use super::common::{AnalysisOptions, load_recording, parse_band};
use crate::cursor::BandCursor;
use clap::Args;
use roomtone_analysis::export::{export_band_curves_csv, export_decay_csv};
use roomtone_analysis::{Band, BandAnalysis, analyze_band, spectrogram};
use std::path::PathBuf;

#[derive(Args)]
pub struct DecayArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Only this band (low, mid or high); all bands when omitted
    #[arg(long, value_parser = parse_band)]
    band: Option<Band>,

    #[command(flatten)]
    options: AnalysisOptions,

    /// Write the trimmed decay curves to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the full band power curves to this CSV file
    #[arg(long, value_name = "CSV")]
    curve: Option<PathBuf>,
}

pub fn run(args: DecayArgs) -> anyhow::Result<()> {
    let config = args.options.config()?;
    let buffer = load_recording(&args.input)?;
    let spec = spectrogram::transform_with(&buffer, &config)?;

    println!("Decay analysis of {}", args.input.display());
    println!(
        "  {} frames, {} bins, hop {:.1} ms",
        spec.num_frames(),
        spec.num_bins(),
        spec.hop_size() as f32 * 1000.0 / spec.sample_rate()
    );

    let bands: Vec<Band> = match args.band {
        Some(band) => vec![band],
        None => BandCursor::default().cycle().collect(),
    };

    let mut analyses = Vec::with_capacity(bands.len());
    for band in bands {
        let analysis = analyze_band(&spec, band, &config)?;
        print_band(&analysis);
        analyses.push(analysis);
    }

    if let Some(output) = &args.output {
        export_decay_csv(&analyses, output)?;
        println!("\nDecay curves written to {}", output.display());
    }

    if let Some(curve) = &args.curve {
        export_band_curves_csv(&analyses, curve)?;
        println!("Band curves written to {}", curve.display());
    }

    Ok(())
}

fn print_band(analysis: &BandAnalysis) {
    let est = &analysis.estimate;
    let times = &analysis.curve.times;

    println!();
    println!("[{}] {}", analysis.band, analysis.range);
    println!(
        "  Peak:      frame {:>4} at {:.3}s, {:.1} dB",
        est.peak_index, times[est.peak_index], est.peak_db
    );
    println!(
        "  -5 dB:     frame {:>4} at {:.3}s, {:.1} dB",
        est.minus5_index,
        times[est.minus5_index],
        analysis.curve.power_db[est.minus5_index]
    );
    println!(
        "  -25 dB:    frame {:>4} at {:.3}s, {:.1} dB",
        est.minus25_index,
        times[est.minus25_index],
        analysis.curve.power_db[est.minus25_index]
    );
    println!("  RT20:      {:.3}s", est.rt20_seconds);
    println!("  RT60:      {:.3}s", est.rt60_seconds);
    println!("  Slope:     {:.1} dB/s", est.slope_db_per_second());
    if let Some(advisory) = est.degeneracy() {
        println!("  Warning:   {advisory}");
    }
}
